use chrono::Duration;

use super::ledger::ProblemLedger;
use crate::contest::{ContestWindow, ParticipantId, Phase, Submission};

/// Penalty charged for each rejected attempt before a problem is solved in contest.
pub const PENALTY_PER_REJECTION_MINUTES: i64 = 20;

/// What a single submission did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// First accept during the contest
    Solved,
    /// Rejected during the contest, penalty accrued
    Rejected,
    /// First accept inside the upsolve window
    Upsolved,
    /// Accepted again during the contest after the problem was solved
    DuplicateAccept,
    /// Rejected during the contest after the problem was solved
    RejectedAfterAccept,
    /// Accepted inside the upsolve window after the problem was already accepted
    DuplicateUpsolve,
    /// Rejected inside the upsolve window
    UpsolveRejected,
    /// Past the upsolve grace period
    Expired,
}

impl SubmitOutcome {
    /// True when the submission changed the record's counters or penalty.
    pub fn changed_state(self) -> bool {
        matches!(
            self,
            SubmitOutcome::Solved | SubmitOutcome::Rejected | SubmitOutcome::Upsolved
        )
    }
}

/// Standing of one participant in one contest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRecord {
    pub participant: ParticipantId,
    pub solved: u32,
    pub upsolved: u32,
    pub total_penalty: Duration,
    /// Set by ranking; `None` means the participant never attempted a problem during the contest
    pub competition_rank: Option<usize>,
    pub first_submit_offset: Option<Duration>,
    pub problems: ProblemLedger,
}

impl ParticipantRecord {
    pub fn new(participant: ParticipantId) -> Self {
        Self {
            participant,
            solved: 0,
            upsolved: 0,
            total_penalty: Duration::zero(),
            competition_rank: None,
            first_submit_offset: None,
            problems: ProblemLedger::new(),
        }
    }

    /// Fold one submission into the record. Submissions must arrive in time order.
    pub fn submit(&mut self, window: &ContestWindow, submission: &Submission) -> SubmitOutcome {
        match window.phase(submission.offset) {
            Phase::Expired => SubmitOutcome::Expired,
            Phase::Competition => {
                self.note_first_submit(submission.offset);
                let entry = self.problems.get_or_create(submission.problem);
                if entry.accepted {
                    if submission.accepted {
                        SubmitOutcome::DuplicateAccept
                    } else {
                        SubmitOutcome::RejectedAfterAccept
                    }
                } else if submission.accepted {
                    self.solved += 1;
                    self.total_penalty = self.total_penalty + submission.offset + entry.accrued_penalty;
                    entry.accepted = true;
                    SubmitOutcome::Solved
                } else {
                    entry.accrued_penalty =
                        entry.accrued_penalty + Duration::minutes(PENALTY_PER_REJECTION_MINUTES);
                    SubmitOutcome::Rejected
                }
            }
            Phase::Upsolve => {
                self.note_first_submit(submission.offset);
                if !submission.accepted {
                    return SubmitOutcome::UpsolveRejected;
                }
                let entry = self.problems.get_or_create(submission.problem);
                if entry.accepted {
                    SubmitOutcome::DuplicateUpsolve
                } else {
                    self.upsolved += 1;
                    entry.accepted = true;
                    SubmitOutcome::Upsolved
                }
            }
        }
    }

    fn note_first_submit(&mut self, offset: Duration) {
        if self.first_submit_offset.is_none() {
            self.first_submit_offset = Some(offset);
        }
    }

    /// Made at least one attempt before the contest ended.
    pub fn competed(&self, window: &ContestWindow) -> bool {
        self.first_submit_offset
            .is_some_and(|offset| offset < window.length())
    }

    pub fn total_solved(&self) -> u32 {
        self.solved + self.upsolved
    }
}
