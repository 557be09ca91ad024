use serde::{Deserialize, Serialize};

use crate::contest::DEFAULT_UPSOLVE_EXPIRATION_DAYS;
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub upsolve: UpsolveConfig,
    /// Overrides for the placement table; defaults apply when absent
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
    /// Judge usernames of enrolled participants
    #[serde(default)]
    pub enrolled: Vec<String>,
}

impl Config {
    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpsolveConfig {
    /// Grace period after the contest ends, e.g. "7d" or "36h"
    #[serde(default = "default_expiration")]
    pub expiration: String,
    /// Order the board by score instead of rank
    #[serde(default)]
    pub sort_by_score: bool,
}

fn default_expiration() -> String {
    format!("{}d", DEFAULT_UPSOLVE_EXPIRATION_DAYS)
}

impl Default for UpsolveConfig {
    fn default() -> Self {
        Self {
            expiration: default_expiration(),
            sort_by_score: false,
        }
    }
}
