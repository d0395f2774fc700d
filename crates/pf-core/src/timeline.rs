//! Scripted runs: drive a field through timed resize events and sample it
//! at a fixed cadence.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::field::{FieldStats, ParticleField};
use crate::viewport::{DeviceTier, Viewport};

/// Viewport change delivered at `at_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResizeEvent {
    pub at_ms: u64,
    pub width: f64,
    pub height: f64,
}

impl ResizeEvent {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub duration_ms: u64,
    pub sample_every_ms: u64,
    pub resizes: Vec<ResizeEvent>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            duration_ms: 20_000,
            sample_every_ms: 1_000,
            resizes: Vec::new(),
        }
    }
}

impl Scenario {
    /// Sample instants: every `sample_every_ms` from 0, plus the end.
    pub fn sample_times(&self) -> Vec<u64> {
        let step = self.sample_every_ms.max(1) as usize;
        let mut times: Vec<u64> = (0..=self.duration_ms).step_by(step).collect();
        if times.last() != Some(&self.duration_ms) {
            times.push(self.duration_ms);
        }
        times
    }
}

/// Field state observed at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub t: u64,
    pub population: usize,
    pub target: usize,
    pub width: f64,
    pub resize_pending: bool,
    pub created: u64,
    pub expired: u64,
    pub evicted: u64,
}

impl Sample {
    fn observe<R: Rng, C: Container>(field: &ParticleField<R, C>) -> Self {
        let stats = field.stats();
        Self {
            t: field.now(),
            population: field.len(),
            target: field.target_count(),
            width: field.environment().viewport.width,
            resize_pending: field.resize_pending(),
            created: stats.created,
            expired: stats.expired,
            evicted: stats.evicted,
        }
    }

    pub fn over_target(&self) -> bool {
        self.population > self.target
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TimelineReport {
    pub tier: DeviceTier,
    pub disabled: bool,
    pub samples: Vec<Sample>,
    pub stats: FieldStats,
}

impl TimelineReport {
    pub fn peak_population(&self) -> usize {
        self.samples.iter().map(|s| s.population).max().unwrap_or(0)
    }
}

/// Run `scenario` against `field` from its current time. Resize events and
/// samples at the same instant apply the resize first.
pub fn run_scenario<R: Rng, C: Container>(
    field: &mut ParticleField<R, C>,
    scenario: &Scenario,
) -> TimelineReport {
    let mut resizes = scenario.resizes.clone();
    resizes.sort_by_key(|r| r.at_ms);
    let mut pending = resizes.iter().peekable();

    let start = field.now();
    let mut samples = Vec::new();
    for offset in scenario.sample_times() {
        let t = start.saturating_add(offset);
        while let Some(event) = pending.next_if(|e| start.saturating_add(e.at_ms) <= t) {
            field.advance_to(start.saturating_add(event.at_ms));
            field.resize(event.viewport());
        }
        field.advance_to(t);
        samples.push(Sample::observe(field));
    }

    tracing::debug!(
        samples = samples.len(),
        created = field.stats().created,
        "scenario finished"
    );

    TimelineReport {
        tier: field.tier(),
        disabled: field.is_disabled(),
        samples,
        stats: field.stats(),
    }
}
