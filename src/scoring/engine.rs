use super::config::ScoringConfig;
use crate::error::{Result, StandingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Points from competition placement, zero when unranked
    pub placement: u32,
    /// Points from upsolved problems, before the cap
    pub upsolve: u32,
    /// True if the cap cut the sum
    pub capped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

/// Points for finishing `rank` out of `total` ranked participants.
pub fn placement_points(rank: usize, total: usize, config: &ScoringConfig) -> Result<u32> {
    if total == 0 {
        return Err(StandingsError::ZeroTotal);
    }
    if rank == 0 || rank > total {
        return Err(StandingsError::RankOutOfRange { rank, total });
    }

    let fraction = rank as f64 / total as f64;
    let points = config
        .buckets
        .iter()
        .find(|bucket| fraction <= bucket.up_to)
        .map(|bucket| bucket.points)
        .unwrap_or(config.fallback_points);
    Ok(points)
}

/// Score one participant within a view of `total` ranked participants.
///
/// # Errors
///
/// `ZeroTotal` if `total` is zero, `RankOutOfRange` if `rank` does not fit in `1..=total`.
pub fn calculate_score(
    rank: Option<usize>,
    total: usize,
    upsolved: u32,
    config: &ScoringConfig,
) -> Result<ScoreResult> {
    if total == 0 {
        return Err(StandingsError::ZeroTotal);
    }
    let placement = match rank {
        Some(rank) => placement_points(rank, total, config)?,
        None => 0,
    };
    Ok(combine(placement, upsolved, config))
}

/// Score for a view where nobody placed, so only upsolves count.
pub fn upsolve_only_score(upsolved: u32, config: &ScoringConfig) -> ScoreResult {
    combine(0, upsolved, config)
}

fn combine(placement: u32, upsolved: u32, config: &ScoringConfig) -> ScoreResult {
    let upsolve = upsolved.saturating_mul(config.upsolve_points);
    let raw = placement.saturating_add(upsolve);
    ScoreResult {
        score: raw.min(config.max_score),
        breakdown: ScoreBreakdown {
            placement,
            upsolve,
            capped: raw > config.max_score,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::PlacementBucket;

    fn default_score(rank: Option<usize>, total: usize, upsolved: u32) -> u32 {
        calculate_score(rank, total, upsolved, &ScoringConfig::default())
            .unwrap()
            .score
    }

    #[test]
    fn test_quintile_boundaries() {
        // 10 participants: ranks 1-2 top bucket, 3-4 next, ...
        assert_eq!(default_score(Some(1), 10, 0), 100);
        assert_eq!(default_score(Some(2), 10, 0), 100);
        assert_eq!(default_score(Some(3), 10, 0), 90);
        assert_eq!(default_score(Some(4), 10, 0), 90);
        assert_eq!(default_score(Some(6), 10, 0), 80);
        assert_eq!(default_score(Some(8), 10, 0), 70);
        assert_eq!(default_score(Some(9), 10, 0), 60);
        assert_eq!(default_score(Some(10), 10, 0), 60);
    }

    #[test]
    fn test_exact_fifths() {
        assert_eq!(default_score(Some(1), 5, 0), 100);
        assert_eq!(default_score(Some(2), 5, 0), 90);
        assert_eq!(default_score(Some(3), 5, 0), 80);
        assert_eq!(default_score(Some(4), 5, 0), 70);
        assert_eq!(default_score(Some(5), 5, 0), 60);
    }

    #[test]
    fn test_upsolve_credit_and_cap() {
        assert_eq!(default_score(None, 10, 0), 0);
        assert_eq!(default_score(None, 10, 3), 18);
        assert_eq!(default_score(Some(10), 10, 3), 78);

        let result = calculate_score(Some(1), 10, 2, &ScoringConfig::default()).unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.breakdown.placement, 100);
        assert_eq!(result.breakdown.upsolve, 12);
        assert!(result.breakdown.capped);

        // upsolving alone can reach but never exceed the cap
        assert_eq!(default_score(None, 10, 40), 100);
    }

    #[test]
    fn test_zero_total_fails() {
        let config = ScoringConfig::default();
        assert_eq!(calculate_score(None, 0, 1, &config), Err(StandingsError::ZeroTotal));
        assert_eq!(calculate_score(Some(1), 0, 0, &config), Err(StandingsError::ZeroTotal));
    }

    #[test]
    fn test_rank_out_of_range_fails() {
        let config = ScoringConfig::default();
        assert_eq!(
            placement_points(4, 3, &config),
            Err(StandingsError::RankOutOfRange { rank: 4, total: 3 })
        );
        assert_eq!(
            placement_points(0, 3, &config),
            Err(StandingsError::RankOutOfRange { rank: 0, total: 3 })
        );
    }

    #[test]
    fn test_score_bound_over_grid() {
        let config = ScoringConfig::default();
        for total in 1..=30 {
            for rank in 1..=total {
                for upsolved in [0, 1, 5, 17] {
                    let s = calculate_score(Some(rank), total, upsolved, &config).unwrap().score;
                    assert!(s <= 100);
                    assert!(s >= 60);
                }
            }
        }
    }

    #[test]
    fn test_custom_buckets() {
        let config = ScoringConfig {
            buckets: vec![PlacementBucket { up_to: 0.5, points: 40 }],
            fallback_points: 20,
            upsolve_points: 10,
            max_score: 50,
        };
        assert_eq!(calculate_score(Some(1), 4, 0, &config).unwrap().score, 40);
        assert_eq!(calculate_score(Some(3), 4, 0, &config).unwrap().score, 20);
        assert_eq!(calculate_score(Some(3), 4, 2, &config).unwrap().score, 40);
        assert_eq!(calculate_score(Some(1), 4, 2, &config).unwrap().score, 50);
        assert_eq!(upsolve_only_score(7, &config).score, 50);
    }
}
