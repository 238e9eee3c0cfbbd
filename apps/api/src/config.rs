use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::matching::composite::WeightProfile;

const DEFAULT_AI_TIMEOUT_MS: u64 = 8000;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent key disables AI enrichment; every match is then deterministic.
    pub anthropic_api_key: Option<String>,
    pub ai_enrichment_enabled: bool,
    pub ai_timeout: Duration,
    pub default_profile: WeightProfile,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            ai_enrichment_enabled: true,
            ai_timeout: Duration::from_millis(DEFAULT_AI_TIMEOUT_MS),
            default_profile: WeightProfile::JobMatch,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let ai_enrichment_enabled = parse_enabled(optional_env("AI_ENRICHMENT_ENABLED"))?;
        let ai_timeout = parse_timeout(optional_env("AI_TIMEOUT_MS"))?;
        let default_profile = parse_profile(optional_env("DEFAULT_WEIGHT_PROFILE"))?;

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            ai_enrichment_enabled,
            ai_timeout,
            default_profile,
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// The key to use for enrichment, if enrichment is both enabled and configured.
    pub fn ai_api_key(&self) -> Option<&str> {
        if self.ai_enrichment_enabled {
            self.anthropic_api_key.as_deref()
        } else {
            None
        }
    }
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_enabled(value: Option<String>) -> Result<bool> {
    match value {
        Some(v) => parse_bool(&v).context("AI_ENRICHMENT_ENABLED must be true or false"),
        None => Ok(true),
    }
}

fn parse_timeout(value: Option<String>) -> Result<Duration> {
    let ms = match value {
        Some(v) => v
            .parse::<u64>()
            .context("AI_TIMEOUT_MS must be a whole number of milliseconds")?,
        None => DEFAULT_AI_TIMEOUT_MS,
    };
    Ok(Duration::from_millis(ms))
}

fn parse_profile(value: Option<String>) -> Result<WeightProfile> {
    match value {
        Some(v) => v
            .parse::<WeightProfile>()
            .context("DEFAULT_WEIGHT_PROFILE must be job_match, candidate_ranking or screening"),
        None => Ok(WeightProfile::JobMatch),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_ai_key_requires_enrichment_enabled() {
        let mut config = Config {
            anthropic_api_key: Some("sk-test".to_string()),
            ai_enrichment_enabled: true,
            ..Config::default()
        };
        assert_eq!(config.ai_api_key(), Some("sk-test"));

        config.ai_enrichment_enabled = false;
        assert_eq!(config.ai_api_key(), None);
    }

    #[test]
    fn test_default_has_no_ai() {
        let config = Config::default();
        assert!(config.ai_enrichment_enabled);
        assert!(config.ai_api_key().is_none());
        assert_eq!(config.default_profile, WeightProfile::JobMatch);
        assert_eq!(config.ai_timeout, Duration::from_millis(DEFAULT_AI_TIMEOUT_MS));
    }

    #[test]
    fn test_unset_values_match_default() {
        let default = Config::default();
        assert_eq!(parse_enabled(None).unwrap(), default.ai_enrichment_enabled);
        assert_eq!(parse_timeout(None).unwrap(), default.ai_timeout);
        assert_eq!(parse_profile(None).unwrap(), default.default_profile);
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(
            parse_timeout(Some("2500".to_string())).unwrap(),
            Duration::from_millis(2500)
        );
        let err = parse_timeout(Some("8s".to_string())).unwrap_err();
        assert!(err.to_string().contains("AI_TIMEOUT_MS"));
        assert!(parse_timeout(Some("-1".to_string())).is_err());
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!(
            parse_profile(Some("screening".to_string())).unwrap(),
            WeightProfile::Screening
        );
        let err = parse_profile(Some("aggressive".to_string())).unwrap_err();
        assert!(err.to_string().contains("DEFAULT_WEIGHT_PROFILE"));
    }

    #[test]
    fn test_enabled_parsing() {
        assert!(!parse_enabled(Some("false".to_string())).unwrap());
        let err = parse_enabled(Some("sometimes".to_string())).unwrap_err();
        assert!(err.to_string().contains("AI_ENRICHMENT_ENABLED"));
    }
}
