use crate::model::constants;
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Placement range is empty: min {min} is above max {max}")]
    EmptyPlacementRange { min: f64, max: f64 },

    #[error("Matchmaking band must be positive, got {0}")]
    NonPositiveBand(f64),

    #[error("Placement ceiling {ceiling} is below the placement range maximum {max}")]
    CeilingBelowRange { ceiling: f64, max: f64 },

    #[error("{name} must not be negative, got {value}")]
    NegativeParameter { name: &'static str, value: f64 }
}

/// Tunable parameters of the rating engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of attempts in a placement run
    pub placement_count: u32,
    /// Lower end of the calibration seed range
    pub placement_min: f64,
    /// Upper end of the calibration seed range
    pub placement_max: f64,
    /// Skips granted per placement run
    pub placement_skips: u32,
    /// Initial upper bound of the calibration bracket
    pub placement_ceiling: f64,
    /// Tolerance around the rating when picking ranked maps
    pub matchmaking_band: f64,
    pub base_gain: f64,
    pub base_loss: f64,
    pub bonus_scale: f64,
    /// Ranked maps that must be resolved before another skip
    pub skip_cooldown: u32
}

impl EngineConfig {
    /// Creates a configuration from environment variables, falling back
    /// to the compiled defaults for anything unset
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            placement_count: env_or("PLACEMENT_COUNT", defaults.placement_count)?,
            placement_min: env_or("PLACEMENT_MIN", defaults.placement_min)?,
            placement_max: env_or("PLACEMENT_MAX", defaults.placement_max)?,
            placement_skips: env_or("PLACEMENT_SKIPS", defaults.placement_skips)?,
            placement_ceiling: env_or("PLACEMENT_CEILING", defaults.placement_ceiling)?,
            matchmaking_band: env_or("MATCHMAKING_BAND", defaults.matchmaking_band)?,
            base_gain: env_or("BASE_GAIN", defaults.base_gain)?,
            base_loss: env_or("BASE_LOSS", defaults.base_loss)?,
            bonus_scale: env_or("BONUS_SCALE", defaults.bonus_scale)?,
            skip_cooldown: env_or("SKIP_COOLDOWN", defaults.skip_cooldown)?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placement_min > self.placement_max {
            return Err(ConfigError::EmptyPlacementRange {
                min: self.placement_min,
                max: self.placement_max
            });
        }

        if self.placement_ceiling < self.placement_max {
            return Err(ConfigError::CeilingBelowRange {
                ceiling: self.placement_ceiling,
                max: self.placement_max
            });
        }

        if self.matchmaking_band <= 0.0 {
            return Err(ConfigError::NonPositiveBand(self.matchmaking_band));
        }

        for (name, value) in [
            ("BASE_GAIN", self.base_gain),
            ("BASE_LOSS", self.base_loss),
            ("BONUS_SCALE", self.bonus_scale)
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeParameter { name, value });
            }
        }

        Ok(())
    }

    /// Rating used when no placement evidence exists
    pub fn placement_midpoint(&self) -> f64 {
        (self.placement_min + self.placement_max) / 2.0
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            placement_count: constants::PLACEMENT_COUNT,
            placement_min: constants::PLACEMENT_MIN,
            placement_max: constants::PLACEMENT_MAX,
            placement_skips: constants::PLACEMENT_SKIPS,
            placement_ceiling: constants::PLACEMENT_CEILING,
            matchmaking_band: constants::MATCHMAKING_BAND,
            base_gain: constants::BASE_GAIN,
            base_loss: constants::BASE_LOSS,
            bonus_scale: constants::BONUS_SCALE,
            skip_cooldown: constants::SKIP_COOLDOWN
        }
    }
}

fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 10] = [
        "PLACEMENT_COUNT",
        "PLACEMENT_MIN",
        "PLACEMENT_MAX",
        "PLACEMENT_SKIPS",
        "PLACEMENT_CEILING",
        "MATCHMAKING_BAND",
        "BASE_GAIN",
        "BASE_LOSS",
        "BONUS_SCALE",
        "SKIP_COOLDOWN"
    ];

    fn cleanup_env_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_matches_constants() {
        let config = EngineConfig::default();

        assert_eq!(config.placement_count, 5);
        assert_eq!(config.placement_skips, 2);
        assert_eq!(config.skip_cooldown, 3);
        assert_eq!(config.placement_midpoint(), 6.0);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        cleanup_env_vars();

        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        cleanup_env_vars();
        env::set_var("PLACEMENT_COUNT", "7");
        env::set_var("MATCHMAKING_BAND", " 0.5 ");

        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.placement_count, 7);
        assert_eq!(config.matchmaking_band, 0.5);
        assert_eq!(config.base_gain, EngineConfig::default().base_gain);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_value() {
        cleanup_env_vars();
        env::set_var("SKIP_COOLDOWN", "three");

        let err = EngineConfig::from_env().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "SKIP_COOLDOWN",
                value: "three".to_string()
            }
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_inverted_range() {
        cleanup_env_vars();
        env::set_var("PLACEMENT_MIN", "7.0");
        env::set_var("PLACEMENT_MAX", "6.0");

        let err = EngineConfig::from_env().unwrap_err();
        assert_eq!(err, ConfigError::EmptyPlacementRange { min: 7.0, max: 6.0 });

        cleanup_env_vars();
    }

    #[test]
    fn test_validate_band() {
        let config = EngineConfig {
            matchmaking_band: 0.0,
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::NonPositiveBand(0.0)));
    }

    #[test]
    fn test_validate_ceiling() {
        let config = EngineConfig {
            placement_ceiling: 5.0,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::CeilingBelowRange { ceiling: 5.0, max: 6.5 })
        );
    }

    #[test]
    fn test_validate_negative_parameters() {
        let config = EngineConfig {
            base_loss: -0.05,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeParameter {
                name: "BASE_LOSS",
                value: -0.05
            })
        );
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_low_ceiling() {
        cleanup_env_vars();
        env::set_var("PLACEMENT_CEILING", "4.0");

        let err = EngineConfig::from_env().unwrap_err();
        assert_eq!(err, ConfigError::CeilingBelowRange { ceiling: 4.0, max: 6.5 });

        cleanup_env_vars();
    }
}
