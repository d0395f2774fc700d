use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DELAY_SPAN_SECS, DURATION_BASE_SECS, DURATION_SPAN_SECS, OPACITY_BASE, OPACITY_SPAN,
    SETTLE_WINDOW_MS, SIZE_BASE, SIZE_SPAN, STAGGER_MS,
};
use crate::target::TargetTable;

/// Uniform attribute range sampled as `random * span + base`, i.e. over
/// `[base, base + span)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeRange {
    pub base: f64,
    pub span: f64,
}

impl AttributeRange {
    pub const fn new(base: f64, span: f64) -> Self {
        Self { base, span }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        rng.random::<f64>() * self.span + self.base
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> f64 {
        self.base + self.span
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.base && value < self.end()
    }
}

/// Tunables for a particle field. Defaults reproduce the page's behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Gap between staggered seed creations (ms).
    pub stagger_ms: u64,
    /// Resize debounce settle window (ms).
    pub settle_window_ms: u64,
    /// Particle size (px).
    pub size: AttributeRange,
    /// Float animation duration (s).
    pub duration_secs: AttributeRange,
    /// Delay before the float animation starts (s).
    pub delay_secs: AttributeRange,
    pub opacity: AttributeRange,
    pub targets: TargetTable,
    /// React to the first resize of a burst instead of the last.
    pub resize_leading_edge: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            stagger_ms: STAGGER_MS,
            settle_window_ms: SETTLE_WINDOW_MS,
            size: AttributeRange::new(SIZE_BASE, SIZE_SPAN),
            duration_secs: AttributeRange::new(DURATION_BASE_SECS, DURATION_SPAN_SECS),
            delay_secs: AttributeRange::new(0.0, DELAY_SPAN_SECS),
            opacity: AttributeRange::new(OPACITY_BASE, OPACITY_SPAN),
            targets: TargetTable::default(),
            resize_leading_edge: false,
        }
    }
}
