use serde::{Deserialize, Serialize};

/// How placement and upsolving turn into a bounded score.
///
/// Placement is bucketed by `rank / total`: the first bucket whose `up_to` is at least
/// that fraction awards its points, anything past the last bucket gets `fallback_points`.
/// Every upsolved problem adds `upsolve_points`, and the sum is capped at `max_score`.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   buckets:
///     - { up_to: 0.2, points: 100 }
///     - { up_to: 0.4, points: 90 }
///     - { up_to: 0.6, points: 80 }
///     - { up_to: 0.8, points: 70 }
///   fallback_points: 60
///   upsolve_points: 6
///   max_score: 100
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default = "default_buckets")]
    pub buckets: Vec<PlacementBucket>,

    #[serde(default = "default_fallback_points")]
    pub fallback_points: u32,

    #[serde(default = "default_upsolve_points")]
    pub upsolve_points: u32,

    #[serde(default = "default_max_score")]
    pub max_score: u32,
}

/// Placement bucket: ranks with `rank / total <= up_to` earn `points`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PlacementBucket {
    pub up_to: f64,
    pub points: u32,
}

fn default_buckets() -> Vec<PlacementBucket> {
    [(0.2, 100), (0.4, 90), (0.6, 80), (0.8, 70)]
        .into_iter()
        .map(|(up_to, points)| PlacementBucket { up_to, points })
        .collect()
}

fn default_fallback_points() -> u32 {
    60
}

fn default_upsolve_points() -> u32 {
    6
}

fn default_max_score() -> u32 {
    100
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
            fallback_points: default_fallback_points(),
            upsolve_points: default_upsolve_points(),
            max_score: default_max_score(),
        }
    }
}
