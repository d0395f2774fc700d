use serde::{Deserialize, Serialize};

use crate::constants::{LOW_END_MAX_CORES, LOW_END_MAX_MEMORY_GB};

/// Visible area the field scatters particles over, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Coarse capability hints as a browser would report them.
/// Either hint may be unavailable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceHints {
    /// Logical core count.
    #[serde(default)]
    pub hardware_concurrency: Option<u32>,
    /// Approximate device memory in GB.
    #[serde(default)]
    pub device_memory_gb: Option<f64>,
}

/// Two-tier device classification used to scale the population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceTier {
    LowEnd,
    #[default]
    Standard,
}

impl DeviceTier {
    /// Low-end when either hint is at or under its threshold. A missing
    /// hint never votes low-end, so no hints at all means standard.
    pub fn classify(hints: &DeviceHints) -> Self {
        let few_cores = hints
            .hardware_concurrency
            .is_some_and(|cores| cores <= LOW_END_MAX_CORES);
        let little_memory = hints
            .device_memory_gb
            .is_some_and(|gb| gb <= LOW_END_MAX_MEMORY_GB);
        if few_cores || little_memory {
            Self::LowEnd
        } else {
            Self::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowEnd => "low-end",
            Self::Standard => "standard",
        }
    }
}

/// Ambient page state the field reads from. The surrounding page writes
/// the viewport; reduced motion and device hints are read once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub prefers_reduced_motion: bool,
    #[serde(default)]
    pub device: DeviceHints,
}

impl Environment {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    pub fn with_device(mut self, device: DeviceHints) -> Self {
        self.device = device;
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.prefers_reduced_motion = reduced;
        self
    }
}
