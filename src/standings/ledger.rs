use chrono::Duration;
use std::collections::BTreeMap;

use crate::contest::ProblemId;

/// Per-problem state of one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemEntry {
    pub accepted: bool,
    /// Penalty from rejected attempts, charged only once the problem is solved in contest
    pub accrued_penalty: Duration,
}

impl Default for ProblemEntry {
    fn default() -> Self {
        Self {
            accepted: false,
            accrued_penalty: Duration::zero(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemLedger {
    entries: BTreeMap<ProblemId, ProblemEntry>,
}

impl ProblemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `problem`, created on first reference.
    pub fn get_or_create(&mut self, problem: ProblemId) -> &mut ProblemEntry {
        self.entries.entry(problem).or_default()
    }

    pub fn get(&self, problem: ProblemId) -> Option<&ProblemEntry> {
        self.entries.get(&problem)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProblemId, &ProblemEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_defaults() {
        let mut ledger = ProblemLedger::new();
        assert!(ledger.get(ProblemId(3)).is_none());

        let entry = ledger.get_or_create(ProblemId(3));
        assert!(!entry.accepted);
        assert_eq!(entry.accrued_penalty, Duration::zero());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_get_or_create_returns_existing() {
        let mut ledger = ProblemLedger::new();
        ledger.get_or_create(ProblemId(0)).accrued_penalty = Duration::minutes(40);
        ledger.get_or_create(ProblemId(0)).accepted = true;

        let entry = ledger.get(ProblemId(0)).unwrap();
        assert!(entry.accepted);
        assert_eq!(entry.accrued_penalty, Duration::minutes(40));
        assert_eq!(ledger.len(), 1);
    }
}
