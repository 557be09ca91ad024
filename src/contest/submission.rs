use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Judge-platform account id of a participant.
#[derive(Hash, Ord, PartialOrd, Eq, PartialEq, Debug, Serialize, Deserialize, Copy, Clone)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Problem index within a contest.
#[derive(Hash, Ord, PartialOrd, Eq, PartialEq, Debug, Serialize, Deserialize, Copy, Clone)]
pub struct ProblemId(pub u32);

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // problems are shown the way judges label them: A, B, ..., Z, AA, ...
        let mut n = self.0 as u64 + 1;
        let mut label = Vec::new();
        while n > 0 {
            n -= 1;
            label.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        label.reverse();
        write!(f, "{}", label.into_iter().collect::<String>())
    }
}

/// One judged attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub participant: ParticipantId,
    pub problem: ProblemId,
    pub accepted: bool,
    /// Time elapsed since the contest began
    pub offset: Duration,
}

impl Submission {
    pub fn new(participant: ParticipantId, problem: ProblemId, accepted: bool, offset: Duration) -> Self {
        Self {
            participant,
            problem,
            accepted,
            offset,
        }
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "participant {} problem {} {} at {}s",
            self.participant,
            self.problem,
            if self.accepted { "accepted" } else { "rejected" },
            self.offset.num_seconds()
        )
    }
}

/// Order submissions by offset. The sort is stable, so simultaneous submissions keep
/// their input order.
pub fn sort_submissions(submissions: &mut [Submission]) {
    submissions.sort_by_key(|s| s.offset);
}
