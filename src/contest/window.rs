use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, StandingsError};

/// Default grace period after the contest ends during which accepts count as upsolves.
pub const DEFAULT_UPSOLVE_EXPIRATION_DAYS: i64 = 7;

/// Where a submission offset falls relative to the contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `offset < length`
    Competition,
    /// `length <= offset <= length + upsolve_expiration`
    Upsolve,
    /// Past the upsolve grace period
    Expired,
}

/// Timing of one contest: when it began, how long it ran and how long upsolving stays open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestWindow {
    begin: DateTime<Utc>,
    length: Duration,
    upsolve_expiration: Duration,
}

impl ContestWindow {
    pub fn new(
        begin: DateTime<Utc>,
        length: Duration,
        upsolve_expiration: Duration,
    ) -> Result<Self> {
        if length <= Duration::zero() {
            return Err(StandingsError::InvalidWindow(format!(
                "length must be positive, got {}s",
                length.num_seconds()
            )));
        }
        if upsolve_expiration < Duration::zero() {
            return Err(StandingsError::InvalidWindow(
                "upsolve expiration must not be negative".to_string(),
            ));
        }
        let deadline = length
            .checked_add(&upsolve_expiration)
            .and_then(|span| begin.checked_add_signed(span));
        if deadline.is_none() {
            return Err(StandingsError::InvalidWindow(
                "begin + length + upsolve expiration is out of range".to_string(),
            ));
        }
        Ok(Self {
            begin,
            length,
            upsolve_expiration,
        })
    }

    /// Build a window from begin/end timestamps, as contest metadata usually reports them.
    pub fn from_bounds(
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
        upsolve_expiration: Duration,
    ) -> Result<Self> {
        Self::new(begin, end - begin, upsolve_expiration)
    }

    pub fn begin(&self) -> DateTime<Utc> {
        self.begin
    }

    pub fn length(&self) -> Duration {
        self.length
    }

    pub fn upsolve_expiration(&self) -> Duration {
        self.upsolve_expiration
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.begin + self.length
    }

    /// Last instant at which an accepted submission still counts as an upsolve.
    pub fn upsolve_deadline(&self) -> DateTime<Utc> {
        self.end() + self.upsolve_expiration
    }

    pub fn is_upsolve_open(&self, now: DateTime<Utc>) -> bool {
        now <= self.upsolve_deadline()
    }

    /// Classify an offset from `begin`.
    pub fn phase(&self, offset: Duration) -> Phase {
        if offset < self.length {
            Phase::Competition
        } else if offset <= self.length + self.upsolve_expiration {
            Phase::Upsolve
        } else {
            Phase::Expired
        }
    }
}
