use clap::Args;
use pf_config::Settings;
use pf_core::ResizeEvent;

/// Page environment overrides shared by every field-running command.
#[derive(Args, Debug, Default, Clone)]
pub struct EnvArgs {
    /// Viewport width in px
    #[arg(long)]
    pub width: Option<f64>,

    /// Viewport height in px
    #[arg(long)]
    pub height: Option<f64>,

    /// Reported logical core count
    #[arg(long)]
    pub cores: Option<u32>,

    /// Reported device memory in GB
    #[arg(long)]
    pub memory: Option<f64>,

    /// Simulate a prefers-reduced-motion page
    #[arg(long)]
    pub reduced_motion: bool,

    /// Seed for reproducible runs (default: from the OS)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl EnvArgs {
    pub fn apply(&self, settings: &mut Settings) {
        let env = &mut settings.environment;
        if let Some(width) = self.width {
            env.viewport.width = width;
        }
        if let Some(height) = self.height {
            env.viewport.height = height;
        }
        if let Some(cores) = self.cores {
            env.device.hardware_concurrency = Some(cores);
        }
        if let Some(memory) = self.memory {
            env.device.device_memory_gb = Some(memory);
        }
        if self.reduced_motion {
            env.prefers_reduced_motion = true;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
    }
}

/// Parse `AT:WxH`, e.g. `5000:400x800`.
pub fn parse_resize(s: &str) -> Result<ResizeEvent, String> {
    let (at, dims) = s
        .split_once(':')
        .ok_or_else(|| format!("expected AT:WxH, got '{s}'"))?;
    let (width, height) = dims
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH after ':', got '{dims}'"))?;
    let at_ms = at
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("bad time '{at}': {e}"))?;
    let width = width
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad width '{width}': {e}"))?;
    let height = height
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad height '{height}': {e}"))?;
    Ok(ResizeEvent {
        at_ms,
        width,
        height,
    })
}
