use chrono::Duration;
use std::collections::{BTreeMap, BTreeSet};

use super::view::Standings;
use crate::contest::ParticipantId;

/// Totals of one account across several contests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub account: String,
    pub contests: u32,
    pub score: u32,
    pub solved: u32,
    pub upsolved: u32,
    pub penalty: Duration,
}

impl SummaryRow {
    fn new(account: String) -> Self {
        Self {
            account,
            contests: 0,
            score: 0,
            solved: 0,
            upsolved: 0,
            penalty: Duration::zero(),
        }
    }
}

/// Running per-account sums over contest views.
///
/// Rows are keyed by username rather than participant id, so the same account lines up
/// across contests even when the judge reports it under different ids.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    rows: BTreeMap<String, SummaryRow>,
    contests: u32,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every participant of one contest view, naming each with `account_of`.
    pub fn add<F>(&mut self, standings: &Standings, account_of: F)
    where
        F: Fn(ParticipantId) -> String,
    {
        self.contests += 1;
        let mut seen = BTreeSet::new();
        for row in standings.rows() {
            let account = account_of(row.record.participant);
            let entry = self
                .rows
                .entry(account.clone())
                .or_insert_with(|| SummaryRow::new(account.clone()));
            if seen.insert(account) {
                entry.contests += 1;
            }
            entry.score += row.score.score;
            entry.solved += row.record.solved;
            entry.upsolved += row.record.upsolved;
            entry.penalty = entry.penalty + row.record.total_penalty;
        }
    }

    pub fn contest_count(&self) -> u32 {
        self.contests
    }

    pub fn get(&self, account: &str) -> Option<&SummaryRow> {
        self.rows.get(account)
    }

    /// Rows by total score descending, then solved descending, then account name.
    pub fn ordered_rows(&self) -> Vec<&SummaryRow> {
        let mut rows: Vec<&SummaryRow> = self.rows.values().collect();
        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.solved.cmp(&a.solved))
                .then_with(|| a.account.cmp(&b.account))
        });
        rows
    }
}
