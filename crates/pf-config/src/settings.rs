use std::path::Path;

use pf_core::{Environment, FieldConfig, Scenario};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Everything a run needs, as read from a TOML settings file.
///
/// ```toml
/// seed = 42
///
/// [environment.viewport]
/// width = 1280
/// height = 800
///
/// [environment.device]
/// hardware_concurrency = 8
///
/// [field]
/// settle_window_ms = 250
///
/// [simulation]
/// duration_ms = 20000
///
/// [[simulation.resizes]]
/// at_ms = 5000
/// width = 400
/// height = 800
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Random seed; absent means seed from the OS.
    pub seed: Option<u64>,
    pub environment: Environment,
    pub field: FieldConfig,
    pub simulation: Scenario,
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load `path` if given, otherwise built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_environment(&self.environment)?;
        validate_field(&self.field)?;
        validate_scenario(&self.simulation)
    }
}

/// Read a standalone scenario file (same shape as `[simulation]`).
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = toml::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn validate_environment(env: &Environment) -> Result<()> {
    let vp = env.viewport;
    if !(vp.width > 0.0 && vp.height > 0.0) {
        return Err(invalid(format!(
            "viewport must be positive, got {}x{}",
            vp.width, vp.height
        )));
    }
    if env.device.device_memory_gb.is_some_and(|gb| gb < 0.0) {
        return Err(invalid("device_memory_gb cannot be negative"));
    }
    Ok(())
}

fn validate_field(field: &FieldConfig) -> Result<()> {
    if field.settle_window_ms == 0 {
        return Err(invalid("settle_window_ms must be at least 1"));
    }
    if !(field.duration_secs.base > 0.0 && field.duration_secs.span > 0.0) {
        return Err(invalid("duration_secs needs a positive base and span"));
    }
    if field.delay_secs.base < 0.0 || field.delay_secs.span < 0.0 {
        return Err(invalid("delay_secs cannot be negative"));
    }
    if field.size.base <= 0.0 || field.size.span < 0.0 {
        return Err(invalid("size needs a positive base"));
    }
    let opacity = field.opacity;
    if opacity.base < 0.0 || opacity.span < 0.0 || opacity.end() > 1.0 {
        return Err(invalid(format!(
            "opacity range [{}, {}) must lie within [0, 1]",
            opacity.base,
            opacity.end()
        )));
    }
    if !field.targets.is_ordered() {
        return Err(invalid("targets.edges must be strictly ascending"));
    }
    let largest = field
        .targets
        .low_end
        .iter()
        .chain(&field.targets.standard)
        .copied()
        .max()
        .unwrap_or(0);
    if (largest as u64).checked_mul(field.stagger_ms).is_none() {
        return Err(invalid(format!(
            "stagger_ms {} is too large to seed {largest} particles",
            field.stagger_ms
        )));
    }
    Ok(())
}

fn validate_scenario(scenario: &Scenario) -> Result<()> {
    if scenario.sample_every_ms == 0 {
        return Err(invalid("sample_every_ms must be at least 1"));
    }
    for event in &scenario.resizes {
        if event.at_ms > scenario.duration_ms {
            return Err(invalid(format!(
                "resize at {}ms is past the {}ms duration",
                event.at_ms, scenario.duration_ms
            )));
        }
        if !(event.width > 0.0 && event.height > 0.0) {
            return Err(invalid(format!(
                "resize at {}ms has non-positive size {}x{}",
                event.at_ms, event.width, event.height
            )));
        }
    }
    Ok(())
}
