use chrono::Duration;
use std::collections::BTreeMap;

use super::record::{ParticipantRecord, SubmitOutcome};
use crate::contest::{ContestWindow, ParticipantId, Submission};
use crate::error::{Result, StandingsError};

/// Counts of submissions that were folded without changing any record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub duplicate_accepts: u32,
    pub rejected_after_accept: u32,
    pub duplicate_upsolves: u32,
    pub upsolve_rejections: u32,
    pub expired: u32,
}

impl Diagnostics {
    fn record(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::DuplicateAccept => self.duplicate_accepts += 1,
            SubmitOutcome::RejectedAfterAccept => self.rejected_after_accept += 1,
            SubmitOutcome::DuplicateUpsolve => self.duplicate_upsolves += 1,
            SubmitOutcome::UpsolveRejected => self.upsolve_rejections += 1,
            SubmitOutcome::Expired => self.expired += 1,
            SubmitOutcome::Solved | SubmitOutcome::Rejected | SubmitOutcome::Upsolved => {}
        }
    }

    pub fn discarded(&self) -> u32 {
        self.duplicate_accepts
            + self.rejected_after_accept
            + self.duplicate_upsolves
            + self.upsolve_rejections
            + self.expired
    }
}

/// Folds a time-ordered submission stream into one record per participant.
#[derive(Debug)]
pub struct RankingAccumulator<'w> {
    window: &'w ContestWindow,
    records: BTreeMap<ParticipantId, ParticipantRecord>,
    diagnostics: Diagnostics,
    last_offset: Option<Duration>,
}

impl<'w> RankingAccumulator<'w> {
    pub fn new(window: &'w ContestWindow) -> Self {
        Self {
            window,
            records: BTreeMap::new(),
            diagnostics: Diagnostics::default(),
            last_offset: None,
        }
    }

    /// Apply one submission to its participant's record.
    ///
    /// # Errors
    ///
    /// Fails fast on a negative offset or on an offset earlier than the previous one;
    /// the caller must sort with [`crate::contest::sort_submissions`] first.
    pub fn submit(&mut self, submission: &Submission) -> Result<SubmitOutcome> {
        if submission.offset < Duration::zero() {
            return Err(StandingsError::NegativeOffset(submission.participant));
        }
        if let Some(previous) = self.last_offset {
            if submission.offset < previous {
                return Err(StandingsError::UnsortedSubmissions {
                    previous: previous.num_seconds(),
                    offset: submission.offset.num_seconds(),
                });
            }
        }
        self.last_offset = Some(submission.offset);

        let record = self
            .records
            .entry(submission.participant)
            .or_insert_with(|| ParticipantRecord::new(submission.participant));
        let outcome = record.submit(self.window, submission);

        if !outcome.changed_state() {
            tracing::debug!(
                participant = %submission.participant,
                problem = %submission.problem,
                accepted = submission.accepted,
                offset_secs = submission.offset.num_seconds(),
                ?outcome,
                "submission discarded"
            );
        }
        self.diagnostics.record(outcome);
        Ok(outcome)
    }

    pub fn submit_all<'a>(&mut self, submissions: impl IntoIterator<Item = &'a Submission>) -> Result<()> {
        for submission in submissions {
            self.submit(submission)?;
        }
        Ok(())
    }

    pub fn records(&self) -> &BTreeMap<ParticipantId, ParticipantRecord> {
        &self.records
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn finish(self) -> (BTreeMap<ParticipantId, ParticipantRecord>, Diagnostics) {
        if self.diagnostics.discarded() > 0 {
            tracing::debug!(
                participants = self.records.len(),
                discarded = self.diagnostics.discarded(),
                expired = self.diagnostics.expired,
                "fold finished"
            );
        }
        (self.records, self.diagnostics)
    }
}
