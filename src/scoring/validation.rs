use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.max_score == 0 {
        errors.push("scoring.max_score: must be positive".to_string());
    }

    if config.fallback_points > config.max_score {
        errors.push(format!(
            "scoring.fallback_points: {} exceeds max_score {}",
            config.fallback_points, config.max_score
        ));
    }

    let mut previous: Option<f64> = None;
    for (i, bucket) in config.buckets.iter().enumerate() {
        if !(bucket.up_to > 0.0 && bucket.up_to <= 1.0) {
            errors.push(format!(
                "scoring.buckets[{}].up_to: {} must be within (0, 1]",
                i, bucket.up_to
            ));
        }
        if let Some(prev) = previous {
            if bucket.up_to <= prev {
                errors.push(format!(
                    "scoring.buckets[{}].up_to: {} must be greater than the previous bucket ({})",
                    i, bucket.up_to, prev
                ));
            }
        }
        if bucket.points > config.max_score {
            errors.push(format!(
                "scoring.buckets[{}].points: {} exceeds max_score {}",
                i, bucket.points, config.max_score
            ));
        }
        previous = Some(bucket.up_to);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
