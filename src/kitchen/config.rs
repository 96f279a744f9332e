//! Tunable kitchen constants.
//!
//! [`KitchenConfig::default()`] carries the standard balance. The browser
//! host may override any subset of fields with a JSON object stored in
//! `localStorage["hellish_kitchen_config"]`; missing keys fall back to the
//! defaults, unknown keys are rejected.

use std::fmt;

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KitchenConfig {
    // ── Session ─────────────────────────────────────────────────
    pub initial_time_secs: u32,
    pub initial_lives: u32,
    /// Remaining seconds at which the clock is shown as critical.
    pub countdown_critical_secs: u32,

    // ── Orders ──────────────────────────────────────────────────
    pub max_orders: usize,
    pub patience_ms: u64,
    /// Chance that a freshly generated order schedules one more.
    pub cascade_probability: f64,
    pub cascade_delay_ms: u64,
    /// Patience fraction below which an order counts as urgent.
    pub warning_fraction: f64,
    /// Per-frame chance of a warning cue for each urgent order.
    pub warning_cue_probability: f64,

    // ── Shelf & pot ─────────────────────────────────────────────
    pub ingredient_stock: u32,
    pub chop_delay_ms: u64,
    pub fire_decay_per_frame: f64,
    pub fire_boost: f64,

    // ── Scoring ─────────────────────────────────────────────────
    pub base_score: u64,
    pub combo_multiplier_step: f64,
    pub combo_timeout_ms: u64,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            initial_time_secs: 90,
            initial_lives: 3,
            countdown_critical_secs: 10,
            max_orders: 4,
            patience_ms: 35_000,
            cascade_probability: 0.3,
            cascade_delay_ms: 1_000,
            warning_fraction: 0.2,
            warning_cue_probability: 0.1,
            ingredient_stock: 10,
            chop_delay_ms: 500,
            fire_decay_per_frame: 0.25,
            fire_boost: 25.0,
            base_score: 100,
            combo_multiplier_step: 0.5,
            combo_timeout_ms: 5_000,
        }
    }
}

/// Why a configuration override was rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// The override was not valid JSON for [`KitchenConfig`].
    Parse(serde_json::Error),
    /// A field parsed but lies outside its usable range.
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {e}"),
            ConfigError::OutOfRange { field, value, expected } => {
                write!(f, "config field `{field}` = {value} is out of range (expected {expected})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl KitchenConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: KitchenConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("cascade_probability", self.cascade_probability)?;
        check_probability("warning_fraction", self.warning_fraction)?;
        check_probability("warning_cue_probability", self.warning_cue_probability)?;
        check_nonzero("initial_time_secs", self.initial_time_secs as u64)?;
        check_nonzero("initial_lives", self.initial_lives as u64)?;
        check_nonzero("max_orders", self.max_orders as u64)?;
        check_nonzero("patience_ms", self.patience_ms)?;
        check_nonzero("combo_timeout_ms", self.combo_timeout_ms)?;
        check_nonzero("cascade_delay_ms", self.cascade_delay_ms)?;
        check_nonzero("chop_delay_ms", self.chop_delay_ms)?;
        if !(0.0..=100.0).contains(&self.fire_decay_per_frame) {
            return Err(ConfigError::OutOfRange {
                field: "fire_decay_per_frame",
                value: self.fire_decay_per_frame,
                expected: "0..=100",
            });
        }
        if !(0.0..=100.0).contains(&self.fire_boost) {
            return Err(ConfigError::OutOfRange {
                field: "fire_boost",
                value: self.fire_boost,
                expected: "0..=100",
            });
        }
        if !(self.combo_multiplier_step >= 0.0 && self.combo_multiplier_step.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "combo_multiplier_step",
                value: self.combo_multiplier_step,
                expected: "a finite value >= 0",
            });
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected: "0.0..=1.0" })
    }
}

fn check_nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value: 0.0, expected: ">= 1" })
    }
}
