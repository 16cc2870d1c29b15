//! Panel timing and defaulting configuration.

use crate::error::{PanelError, PanelResult};
use serde::{Deserialize, Serialize};

/// Timings and defaults for room bootstrap and backup synchronization.
///
/// All delays are in milliseconds of scheduler time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Delay between `schedule_init` and the first constants poll.
    pub init_delay_ms: u64,
    /// Delay between constants polls.
    pub poll_interval_ms: u64,
    /// Constants polls before falling back.
    pub max_attempts: u32,
    /// Delay between load polls once defaults are seeded.
    pub load_poll_delay_ms: u64,
    /// Load polls allowed, as a multiple of `max_attempts`.
    pub load_attempt_multiplier: u32,
    /// Safety factor seeded when the constant never shows up.
    pub fallback_safety_factor_percent: f64,
    /// Unit size (TR) seeded for a room with no selection.
    pub default_unit_capacity_tr: f64,
    /// Delay before mirroring a backup change onto the sibling surface.
    /// Zero mirrors inline.
    pub sync_debounce_ms: u64,
    /// Name of the safety-factor constant in the constants provider.
    pub safety_factor_constant: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            init_delay_ms: 100,
            poll_interval_ms: 100,
            max_attempts: 5,
            load_poll_delay_ms: 200,
            load_attempt_multiplier: 2,
            fallback_safety_factor_percent: 10.0,
            default_unit_capacity_tr: 5.0,
            sync_debounce_ms: 0,
            safety_factor_constant: "DEFAULT_SAFETY_FACTOR_PERCENT".to_string(),
        }
    }
}

impl PanelConfig {
    pub fn validate(&self) -> PanelResult<()> {
        if self.max_attempts == 0 {
            return Err(PanelError::InvalidConfig {
                what: "max_attempts must be at least 1",
            });
        }
        if self.load_attempt_multiplier == 0 {
            return Err(PanelError::InvalidConfig {
                what: "load_attempt_multiplier must be at least 1",
            });
        }
        rc_core::ensure_non_negative(
            self.fallback_safety_factor_percent,
            "fallback_safety_factor_percent",
        )?;
        rc_core::ensure_positive(self.default_unit_capacity_tr, "default_unit_capacity_tr")?;
        if self.safety_factor_constant.trim().is_empty() {
            return Err(PanelError::InvalidConfig {
                what: "safety_factor_constant must not be empty",
            });
        }
        Ok(())
    }

    /// Load polls allowed after seeding.
    pub fn load_attempt_budget(&self) -> u32 {
        self.max_attempts.saturating_mul(self.load_attempt_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PanelConfig::default();
        config.validate().unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.load_attempt_budget(), 10);
        assert_eq!(config.fallback_safety_factor_percent, 10.0);
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = PanelConfig {
            max_attempts: 0,
            ..PanelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PanelError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn bad_defaults_rejected() {
        let config = PanelConfig {
            default_unit_capacity_tr: 0.0,
            ..PanelConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PanelConfig {
            fallback_safety_factor_percent: f64::NAN,
            ..PanelConfig::default()
        };
        assert!(matches!(config.validate(), Err(PanelError::Core(_))));

        let config = PanelConfig {
            fallback_safety_factor_percent: -1.0,
            ..PanelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PanelError::Core(rc_core::RcError::Negative { .. }))
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: PanelConfig = serde_json::from_str(r#"{"max_attempts": 3}"#).unwrap();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.poll_interval_ms, 100);
    }
}
