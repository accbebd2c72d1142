use serde::Deserialize;

use crate::error::{DogUniverseError, DogUniverseResult};
use crate::loyalty::Locale;

/// Root application configuration. Loaded from environment variables
/// with the prefix `DOG_UNIVERSE__` and an optional TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub loyalty: LoyaltyConfig,
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            loyalty: LoyaltyConfig::default(),
        }
    }
}

// ─── Loyalty Config ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LoyaltyConfig {
    /// Lifetime revenue, in the base currency unit, that grants Platinum
    /// regardless of stay count.
    #[serde(default = "default_platinum_revenue_threshold")]
    pub platinum_revenue_threshold: f64,
    /// Language tag used for grade labels when the caller gives none.
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_platinum_revenue_threshold() -> f64 { 5000.0 }
fn default_locale() -> String { "fr".to_string() }

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            platinum_revenue_threshold: default_platinum_revenue_threshold(),
            default_locale: default_locale(),
        }
    }
}

impl LoyaltyConfig {
    pub fn validate(&self) -> DogUniverseResult<()> {
        let threshold = self.platinum_revenue_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(DogUniverseError::Config(format!(
                "loyalty.platinum_revenue_threshold must be a finite non-negative number, got {threshold}"
            )));
        }
        if Locale::parse(&self.default_locale).is_none() {
            return Err(DogUniverseError::Config(format!(
                "loyalty.default_locale must be one of fr, en, got {:?}",
                self.default_locale
            )));
        }
        Ok(())
    }

    /// Configured default locale; an unrecognized tag falls back to French.
    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.default_locale)
    }
}

impl AppConfig {
    /// Load configuration from an optional config file, then environment
    /// variables (which take precedence).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("DOG_UNIVERSE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.loyalty.platinum_revenue_threshold, 5000.0);
        assert_eq!(config.loyalty.locale(), Locale::Fr);
        assert!(config.loyalty.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let config = LoyaltyConfig {
            platinum_revenue_threshold: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DogUniverseError::Config(_))));
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let config = LoyaltyConfig {
            platinum_revenue_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_default_locale() {
        let config = LoyaltyConfig {
            default_locale: "de".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.locale(), Locale::Fr);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(AppConfig::load(Some("/nonexistent/dog-universe.toml")).is_err());
    }

    #[test]
    fn test_partial_loyalty_section_uses_defaults() {
        let config: LoyaltyConfig =
            serde_json::from_str(r#"{"platinum_revenue_threshold": 8000.0}"#).unwrap();
        assert_eq!(config.platinum_revenue_threshold, 8000.0);
        assert_eq!(config.default_locale, "fr");
    }
}
