pub mod submission;
pub mod window;

pub use submission::{sort_submissions, ParticipantId, ProblemId, Submission};
pub use window::{ContestWindow, Phase, DEFAULT_UPSOLVE_EXPIRATION_DAYS};
