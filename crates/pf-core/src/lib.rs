//! Particle field lifecycle engine.
//!
//! Keeps a self-replenishing population of decorative particles whose size
//! tracks the viewport width and a coarse device tier, debounces viewport
//! resizes, and stays inert under a reduced-motion preference.
//!
//! Zero I/O: time is virtual and randomness is injected, so every run is
//! reproducible from a seed. Rendering goes through the [`Container`] trait.

pub mod config;
pub mod constants;
pub mod container;
pub mod debounce;
pub mod field;
pub mod particle;
pub mod population;
pub mod scheduler;
pub mod target;
pub mod timeline;
pub mod viewport;

pub use config::{AttributeRange, FieldConfig};
pub use constants::{SETTLE_WINDOW_MS, STAGGER_MS};
pub use container::{Container, ContainerOp, NullContainer, RecordingContainer};
pub use debounce::Debouncer;
pub use field::{FieldStats, ParticleField};
pub use particle::{Particle, ParticleId, Position};
pub use population::Population;
pub use scheduler::{Scheduler, TaskId};
pub use target::{TargetTable, target_count};
pub use timeline::{ResizeEvent, Sample, Scenario, TimelineReport, run_scenario};
pub use viewport::{DeviceHints, DeviceTier, Environment, Viewport};
