use thiserror::Error;

use crate::contest::ParticipantId;

#[derive(Debug, Error, PartialEq)]
pub enum StandingsError {
    #[error("Participant {0} is not enrolled")]
    NotEnrolled(ParticipantId),

    #[error("Participant {0} has no record in this contest")]
    UnknownParticipant(ParticipantId),

    #[error("Cannot score against an empty field (total is zero)")]
    ZeroTotal,

    #[error("Rank {rank} is outside 1..={total}")]
    RankOutOfRange { rank: usize, total: usize },

    #[error("Submissions are not sorted: offset {offset}s follows {previous}s")]
    UnsortedSubmissions { previous: i64, offset: i64 },

    #[error("Submission by participant {0} has a negative offset")]
    NegativeOffset(ParticipantId),

    #[error("Invalid contest window: {0}")]
    InvalidWindow(String),
}

pub type Result<T> = std::result::Result<T, StandingsError>;
