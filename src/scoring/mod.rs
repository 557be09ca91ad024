pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{calculate_score, placement_points, upsolve_only_score, ScoreBreakdown, ScoreResult};
pub use validation::validate_scoring;
