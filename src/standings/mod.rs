pub mod accumulator;
pub mod ledger;
pub mod rank;
pub mod record;
pub mod summary;
pub mod view;

pub use accumulator::{Diagnostics, RankingAccumulator};
pub use ledger::{ProblemEntry, ProblemLedger};
pub use rank::{assign_competition_ranks, competition_order, display_order};
pub use record::{ParticipantRecord, SubmitOutcome, PENALTY_PER_REJECTION_MINUTES};
pub use summary::{Summary, SummaryRow};
pub use view::{ContestStandings, Roster, StandingRow, Standings};
