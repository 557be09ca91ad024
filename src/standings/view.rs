use std::collections::{BTreeMap, BTreeSet};

use super::accumulator::{Diagnostics, RankingAccumulator};
use super::rank::{assign_competition_ranks, display_order};
use super::record::ParticipantRecord;
use crate::contest::{ContestWindow, ParticipantId, Submission};
use crate::error::{Result, StandingsError};
use crate::scoring::{calculate_score, upsolve_only_score, ScoreResult, ScoringConfig};

/// Participants officially enrolled in the course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    enrolled: BTreeSet<ParticipantId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enroll(&mut self, participant: ParticipantId) {
        self.enrolled.insert(participant);
    }

    pub fn is_enrolled(&self, participant: ParticipantId) -> bool {
        self.enrolled.contains(&participant)
    }

    pub fn len(&self) -> usize {
        self.enrolled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enrolled.is_empty()
    }
}

impl FromIterator<ParticipantId> for Roster {
    fn from_iter<I: IntoIterator<Item = ParticipantId>>(iter: I) -> Self {
        Self {
            enrolled: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub record: ParticipantRecord,
    pub score: ScoreResult,
}

/// Ranked and scored records of one view (everyone, or enrolled participants only).
#[derive(Debug, Clone)]
pub struct Standings {
    rows: BTreeMap<ParticipantId, StandingRow>,
    ranked: usize,
    diagnostics: Diagnostics,
}

impl Standings {
    /// Fold the submissions of participants accepted by `include`, rank and score them.
    ///
    /// `submissions` must already be in time order; filtering keeps that order.
    pub fn compute<F>(
        window: &ContestWindow,
        submissions: &[Submission],
        include: F,
        scoring: &ScoringConfig,
    ) -> Result<Self>
    where
        F: Fn(ParticipantId) -> bool,
    {
        let mut accumulator = RankingAccumulator::new(window);
        accumulator.submit_all(submissions.iter().filter(|s| include(s.participant)))?;
        let (mut records, diagnostics) = accumulator.finish();

        let ranked = assign_competition_ranks(&mut records, window);

        let mut rows = BTreeMap::new();
        for (id, record) in records {
            let score = if ranked == 0 {
                upsolve_only_score(record.upsolved, scoring)
            } else {
                calculate_score(record.competition_rank, ranked, record.upsolved, scoring)?
            };
            rows.insert(id, StandingRow { record, score });
        }

        tracing::debug!(
            participants = rows.len(),
            ranked,
            discarded = diagnostics.discarded(),
            "standings computed"
        );

        Ok(Self {
            rows,
            ranked,
            diagnostics,
        })
    }

    pub fn get(&self, participant: ParticipantId) -> Option<&StandingRow> {
        self.rows.get(&participant)
    }

    /// Competition rank within this view.
    pub fn rank_of(&self, participant: ParticipantId) -> Result<Option<usize>> {
        self.get(participant)
            .map(|row| row.record.competition_rank)
            .ok_or(StandingsError::UnknownParticipant(participant))
    }

    /// Number of participants with a competition rank; the denominator for placement.
    pub fn ranked_count(&self) -> usize {
        self.ranked
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn rows(&self) -> impl Iterator<Item = &StandingRow> {
        self.rows.values()
    }

    /// Rows ranked first, upsolve-only participants after. With `by_score` the rows are
    /// re-sorted by score (descending), keeping that order among equal scores.
    pub fn ordered_rows(&self, by_score: bool) -> Vec<&StandingRow> {
        let mut rows: Vec<&StandingRow> = self.rows.values().collect();
        rows.sort_by(|a, b| display_order(&a.record, &b.record));
        if by_score {
            rows.sort_by(|a, b| b.score.score.cmp(&a.score.score));
        }
        rows
    }
}

/// Both views of one contest computed from the same submission stream.
#[derive(Debug, Clone)]
pub struct ContestStandings {
    total: Standings,
    enrolled: Standings,
    roster: Roster,
    scoring: ScoringConfig,
}

impl ContestStandings {
    /// The enrolled view re-folds the filtered stream rather than filtering the total view.
    pub fn compute(
        window: &ContestWindow,
        submissions: &[Submission],
        roster: Roster,
        scoring: &ScoringConfig,
    ) -> Result<Self> {
        let total = Standings::compute(window, submissions, |_| true, scoring)?;
        let enrolled = Standings::compute(window, submissions, |id| roster.is_enrolled(id), scoring)?;

        tracing::info!(
            participants = total.len(),
            ranked = total.ranked_count(),
            enrolled_participants = enrolled.len(),
            enrolled_ranked = enrolled.ranked_count(),
            "contest standings ready"
        );

        Ok(Self {
            total,
            enrolled,
            roster,
            scoring: scoring.clone(),
        })
    }

    pub fn total(&self) -> &Standings {
        &self.total
    }

    pub fn enrolled(&self) -> &Standings {
        &self.enrolled
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn is_enrolled(&self, participant: ParticipantId) -> bool {
        self.roster.is_enrolled(participant)
    }

    /// Rank among all participants.
    pub fn global_rank(&self, participant: ParticipantId) -> Result<Option<usize>> {
        self.total.rank_of(participant)
    }

    /// Position of an enrolled participant among enrolled participants, derived from the
    /// global ranking by skipping everyone who is not enrolled.
    ///
    /// # Errors
    ///
    /// `NotEnrolled` if the participant is not on the roster.
    pub fn attendance_rank(&self, participant: ParticipantId) -> Result<Option<usize>> {
        if !self.roster.is_enrolled(participant) {
            return Err(StandingsError::NotEnrolled(participant));
        }
        let Some(own) = self
            .total
            .get(participant)
            .and_then(|row| row.record.competition_rank)
        else {
            return Ok(None);
        };

        let position = self
            .total
            .rows()
            .filter(|row| self.roster.is_enrolled(row.record.participant))
            .filter_map(|row| row.record.competition_rank)
            .filter(|&rank| rank <= own)
            .count();
        Ok(Some(position))
    }

    /// Score among enrolled participants, using the attendance rank.
    pub fn attendance_score(&self, participant: ParticipantId) -> Result<ScoreResult> {
        let rank = self.attendance_rank(participant)?;
        let upsolved = self
            .total
            .get(participant)
            .map(|row| row.record.upsolved)
            .unwrap_or(0);

        let total = self
            .total
            .rows()
            .filter(|row| {
                row.record.competition_rank.is_some()
                    && self.roster.is_enrolled(row.record.participant)
            })
            .count();
        if total == 0 {
            return Ok(upsolve_only_score(upsolved, &self.scoring));
        }
        calculate_score(rank, total, upsolved, &self.scoring)
    }

    /// Score among all participants.
    pub fn global_score(&self, participant: ParticipantId) -> Result<ScoreResult> {
        self.total
            .get(participant)
            .map(|row| row.score)
            .ok_or(StandingsError::UnknownParticipant(participant))
    }
}
