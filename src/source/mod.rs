pub mod vjudge;

pub use vjudge::{Account, ContestDocument};
