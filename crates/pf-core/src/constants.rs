/// Delay between consecutive seed creations at startup (ms).
pub const STAGGER_MS: u64 = 100;

/// Debounce settle window for viewport resize signals (ms).
pub const SETTLE_WINDOW_MS: u64 = 250;

/// Viewport width bucket edges (px). A width equal to an edge belongs to
/// the bucket above it.
pub const WIDTH_EDGES: [f64; 3] = [480.0, 768.0, 1024.0];

/// Target population per width bucket, low-end tier.
pub const LOW_END_TARGETS: [usize; 4] = [15, 25, 35, 40];

/// Target population per width bucket, standard tier.
pub const STANDARD_TARGETS: [usize; 4] = [25, 35, 45, 60];

/// Devices reporting this many logical cores or fewer are low-end.
pub const LOW_END_MAX_CORES: u32 = 2;

/// Devices reporting this much memory (GB) or less are low-end.
pub const LOW_END_MAX_MEMORY_GB: f64 = 4.0;

/// Particle size range in px: `random * 3 + 1`.
pub const SIZE_BASE: f64 = 1.0;
pub const SIZE_SPAN: f64 = 3.0;

/// Animation duration range in seconds: `random * 4 + 3`.
pub const DURATION_BASE_SECS: f64 = 3.0;
pub const DURATION_SPAN_SECS: f64 = 4.0;

/// Animation delay range in seconds: `random * 2`.
pub const DELAY_SPAN_SECS: f64 = 2.0;

/// Opacity range: `random * 0.5 + 0.3`.
pub const OPACITY_BASE: f64 = 0.3;
pub const OPACITY_SPAN: f64 = 0.5;
