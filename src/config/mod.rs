mod schema;

pub use schema::{Config, UpsolveConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::validate_scoring;

/// Get the config directory path (~/.config/acm-standings/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("acm-standings"))
}

/// Get the default config file path (~/.config/acm-standings/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// With no explicit path, a missing default file yields the built-in defaults.
/// An explicit path that does not exist is an error.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            default_path
        }
    };

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Parse the upsolve grace period from its humantime form.
pub fn parse_expiration(value: &str) -> Result<chrono::Duration> {
    let std_duration = humantime::parse_duration(value.trim())
        .with_context(|| format!("Invalid upsolve expiration '{}'", value))?;
    chrono::Duration::from_std(std_duration)
        .with_context(|| format!("Upsolve expiration '{}' is too large", value))
}

/// Check the whole config, collecting every problem found.
pub fn validate_config(config: &Config) -> std::result::Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(e) = parse_expiration(&config.upsolve.expiration) {
        errors.push(format!("upsolve.expiration: {:#}", e));
    }

    if let Some(scoring) = &config.scoring {
        if let Err(scoring_errors) = validate_scoring(scoring) {
            errors.extend(scoring_errors);
        }
    }

    for (i, name) in config.enrolled.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(format!("enrolled[{}]: username is empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use std::env;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
upsolve:
  expiration: 3d
  sort_by_score: true
scoring:
  upsolve_points: 5
enrolled:
  - alice
  - bob
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.upsolve.expiration, "3d");
        assert!(config.upsolve.sort_by_score);
        assert_eq!(config.enrolled, vec!["alice", "bob"]);
        assert_eq!(config.scoring().upsolve_points, 5);
        assert_eq!(config.scoring().max_score, 100);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_sections_use_defaults() {
        let config: Config = serde_saphyr::from_str("enrolled: []\n").unwrap();
        assert_eq!(config.upsolve, UpsolveConfig::default());
        assert_eq!(config.scoring(), ScoringConfig::default());
        assert_eq!(
            parse_expiration(&config.upsolve.expiration).unwrap(),
            chrono::Duration::days(7)
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "upsolve:\n  expiry: 3d\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_parse_expiration_forms() {
        assert_eq!(parse_expiration("36h").unwrap(), chrono::Duration::hours(36));
        assert_eq!(parse_expiration("0s").unwrap(), chrono::Duration::zero());
        assert!(parse_expiration("soon").is_err());
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut config = Config::default();
        config.upsolve.expiration = "forever".to_string();
        config.enrolled = vec!["alice".to_string(), "  ".to_string()];
        config.scoring = Some(ScoringConfig {
            max_score: 0,
            ..ScoringConfig::default()
        });

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.starts_with("upsolve.expiration")));
        assert!(errors.iter().any(|e| e.starts_with("enrolled[1]")));
        assert!(errors.iter().any(|e| e.starts_with("scoring.max_score")));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_path = env::temp_dir().join("acm_standings_test_config.yaml");
        fs::write(&temp_path, "upsolve:\n  expiration: 1d\nenrolled: [carol]\n").unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.upsolve.expiration, "1d");
        assert_eq!(config.enrolled, vec!["carol"]);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_config_explicit_missing_path() {
        let temp_path = env::temp_dir().join("acm_standings_test_missing_config.yaml");
        let _ = fs::remove_file(&temp_path);
        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
