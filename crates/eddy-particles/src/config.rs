//! Simulation parameters (defaults are the documented constants)

use eddy_core::{EddyError, Result};
use serde::Serialize;

/// Number of particles in the store
pub const COUNT: usize = 5000;
/// Flow-field grid rows
pub const ROWS: usize = 100;
/// Flow-field grid columns
pub const COLS: usize = 100;
/// Magnitude of every flow-field vector
pub const STRENGTH: f64 = 0.001;
/// Velocity cap, world units per frame
pub const MAX_SPEED: f64 = 0.1;
/// Steering force cap, world units per frame squared
pub const MAX_FORCE: f64 = 0.1;
/// Respawned particles draw their lifespan from [0, LIFESPAN_MAX)
pub const LIFESPAN_MAX: f64 = 1.4;
/// Freshly constructed particles draw their lifespan from [0, INITIAL_LIFESPAN_MAX)
pub const INITIAL_LIFESPAN_MAX: f64 = 2.0;
/// Birth offset from the pointer has length in [0, JITTER_MAX)
pub const JITTER_MAX: f64 = 0.5;
/// Per-frame exponential smoothing factor pulling scale toward zero
pub const SCALE_DECAY: f64 = 0.05;
/// Seed for both the noise function and the spawn RNG
pub const DEFAULT_SEED: u32 = 0x5EED_F10E;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
    pub strength: f64,
    pub max_speed: f64,
    pub max_force: f64,
    pub lifespan_max: f64,
    pub initial_lifespan_max: f64,
    pub jitter_max: f64,
    pub scale_decay: f64,
    pub seed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            count: COUNT,
            rows: ROWS,
            cols: COLS,
            strength: STRENGTH,
            max_speed: MAX_SPEED,
            max_force: MAX_FORCE,
            lifespan_max: LIFESPAN_MAX,
            initial_lifespan_max: INITIAL_LIFESPAN_MAX,
            jitter_max: JITTER_MAX,
            scale_decay: SCALE_DECAY,
            seed: DEFAULT_SEED,
        }
    }
}

const KNOWN_KEYS: &[&str] = &[
    "count",
    "rows",
    "cols",
    "strength",
    "max_speed",
    "max_force",
    "lifespan_max",
    "initial_lifespan_max",
    "jitter_max",
    "scale_decay",
    "seed",
];

impl SimConfig {
    /// Parse overrides from a TOML table, then validate the result.
    /// Keys that are absent keep their default.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::warn!("ignoring unknown simulation key '{key}'");
            }
        }

        if let Some(v) = table.get("count") {
            config.count = toml_usize(v, "count")?;
        }
        if let Some(v) = table.get("rows") {
            config.rows = toml_usize(v, "rows")?;
        }
        if let Some(v) = table.get("cols") {
            config.cols = toml_usize(v, "cols")?;
        }
        if let Some(v) = table.get("strength") {
            config.strength = toml_f64(v, "strength")?;
        }
        if let Some(v) = table.get("max_speed") {
            config.max_speed = toml_f64(v, "max_speed")?;
        }
        if let Some(v) = table.get("max_force") {
            config.max_force = toml_f64(v, "max_force")?;
        }
        if let Some(v) = table.get("lifespan_max") {
            config.lifespan_max = toml_f64(v, "lifespan_max")?;
        }
        if let Some(v) = table.get("initial_lifespan_max") {
            config.initial_lifespan_max = toml_f64(v, "initial_lifespan_max")?;
        }
        if let Some(v) = table.get("jitter_max") {
            config.jitter_max = toml_f64(v, "jitter_max")?;
        }
        if let Some(v) = table.get("scale_decay") {
            config.scale_decay = toml_f64(v, "scale_decay")?;
        }
        if let Some(v) = table.get("seed") {
            let seed = v
                .as_integer()
                .ok_or_else(|| EddyError::InvalidConfig("seed must be an integer".into()))?;
            config.seed = u32::try_from(seed).map_err(|_| EddyError::ValueOutOfRange {
                field: "seed".into(),
                min: 0.0,
                max: u32::MAX as f64,
                value: seed as f64,
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document and apply it as overrides
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(source)?;
        Self::from_toml(&table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(EddyError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.count == 0 {
            return Err(EddyError::InvalidConfig("count must be positive".into()));
        }
        require_positive("strength", self.strength)?;
        require_positive("max_speed", self.max_speed)?;
        require_positive("max_force", self.max_force)?;
        require_positive("lifespan_max", self.lifespan_max)?;
        require_positive("initial_lifespan_max", self.initial_lifespan_max)?;
        if !self.jitter_max.is_finite() || self.jitter_max < 0.0 {
            return Err(out_of_range("jitter_max", 0.0, f64::MAX, self.jitter_max));
        }
        if !(0.0..=1.0).contains(&self.scale_decay) {
            return Err(out_of_range("scale_decay", 0.0, 1.0, self.scale_decay));
        }
        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(out_of_range(field, f64::MIN_POSITIVE, f64::MAX, value))
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> EddyError {
    EddyError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f64(v: &toml::Value, field: &str) -> Result<f64> {
    v.as_float()
        .or_else(|| v.as_integer().map(|i| i as f64))
        .ok_or_else(|| EddyError::InvalidConfig(format!("{field} must be a number")))
}

fn toml_usize(v: &toml::Value, field: &str) -> Result<usize> {
    let n = v
        .as_integer()
        .ok_or_else(|| EddyError::InvalidConfig(format!("{field} must be an integer")))?;
    usize::try_from(n).map_err(|_| out_of_range(field, 0.0, usize::MAX as f64, n as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = SimConfig::default();
        assert_eq!(config.count, 5000);
        assert_eq!((config.rows, config.cols), (100, 100));
        assert_eq!(config.strength, 0.001);
        assert_eq!(config.max_speed, 0.1);
        assert_eq!(config.max_force, 0.1);
        assert_eq!(config.lifespan_max, 1.4);
        assert_eq!(config.jitter_max, 0.5);
        assert_eq!(config.scale_decay, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
count = 200
rows = 20
cols = 30
seed = 9
max_speed = 0.2
"#;
        let config = SimConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.count, 200);
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 30);
        assert_eq!(config.seed, 9);
        assert!((config.max_speed - 0.2).abs() < 1e-12);
        assert_eq!(config.max_force, MAX_FORCE);
    }

    #[test]
    fn toml_integer_float_coercion() {
        let config = SimConfig::from_toml_str("lifespan_max = 2").unwrap();
        assert_eq!(config.lifespan_max, 2.0);
    }

    #[test]
    fn zero_grid_rejected() {
        let err = SimConfig::from_toml_str("rows = 0").unwrap_err();
        assert!(matches!(err, EddyError::InvalidGrid { rows: 0, .. }));
    }

    #[test]
    fn bad_values_rejected() {
        assert!(SimConfig::from_toml_str("rows = -3").is_err());
        assert!(SimConfig::from_toml_str("max_speed = 0.0").is_err());
        assert!(SimConfig::from_toml_str("scale_decay = 1.5").is_err());
        assert!(SimConfig::from_toml_str("jitter_max = -0.1").is_err());
        assert!(SimConfig::from_toml_str("strength = \"big\"").is_err());
        assert!(SimConfig::from_toml_str("seed = -1").is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = SimConfig::from_toml_str("colour = \"blue\"").unwrap();
        assert_eq!(config, SimConfig::default());
    }
}
