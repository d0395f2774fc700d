mod args;
mod live;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pf_config::{Settings, load_scenario, resolve_config_path};
use pf_core::{
    Container, DeviceTier, NullContainer, ParticleField, RecordingContainer, ResizeEvent,
    Scenario, TargetTable, run_scenario,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::args::{EnvArgs, parse_resize};

#[derive(Parser)]
#[command(name = "pf", about = "Decorative particle field simulator")]
struct Cli {
    /// Settings file (default: $PF_CONFIG, then ~/.particle-field/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the target population for a width and device tier
    Target {
        /// Viewport width in px
        #[arg(long, required_unless_present = "table")]
        width: Option<f64>,

        /// Use the low-end device tier
        #[arg(long)]
        low_end: bool,

        /// Print the whole width × tier table
        #[arg(long)]
        table: bool,
    },

    /// Run a scripted timeline in virtual time and print samples
    Simulate {
        #[command(flatten)]
        env: EnvArgs,

        /// Scenario file (TOML) replacing the configured [simulation]
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Timeline length in ms
        #[arg(long)]
        duration: Option<u64>,

        /// Sampling interval in ms
        #[arg(long)]
        sample_every: Option<u64>,

        /// Resize event as AT:WxH (repeatable)
        #[arg(long = "resize", value_parser = parse_resize)]
        resizes: Vec<ResizeEvent>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the live population at a point in virtual time
    Snapshot {
        #[command(flatten)]
        env: EnvArgs,

        /// Virtual time in ms
        #[arg(long)]
        at: u64,

        /// Emit particles as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run against the wall clock; stdin takes `resize W H`, `status`, `quit`
    Run {
        #[command(flatten)]
        env: EnvArgs,

        /// Status line interval in ms
        #[arg(long, default_value_t = 1000)]
        status_every: u64,

        /// Stop after this many ms
        #[arg(long)]
        duration: Option<u64>,
    },
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = resolve_config_path(cli.config.as_deref());
    Settings::load_or_default(path.as_deref()).with_context(|| match &path {
        Some(p) => format!("failed to load settings from {}", p.display()),
        None => "failed to build default settings".to_string(),
    })
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn build_field<C: Container>(settings: &Settings, container: C) -> ParticleField<SmallRng, C> {
    ParticleField::new(
        settings.environment,
        settings.field.clone(),
        make_rng(settings.seed),
        container,
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Target {
            width,
            low_end,
            table,
        } => cmd_target(&cli, *width, *low_end, *table),
        Commands::Simulate {
            env,
            scenario,
            duration,
            sample_every,
            resizes,
            json,
        } => cmd_simulate(
            &cli,
            env,
            scenario.as_deref(),
            *duration,
            *sample_every,
            resizes,
            *json,
        ),
        Commands::Snapshot { env, at, json } => cmd_snapshot(&cli, env, *at, *json),
        Commands::Run {
            env,
            status_every,
            duration,
        } => cmd_run(&cli, env, *status_every, *duration).await,
    }
}

fn cmd_target(cli: &Cli, width: Option<f64>, low_end: bool, table: bool) -> Result<()> {
    let settings = load_settings(cli)?;
    let targets = &settings.field.targets;

    if table {
        print_table(targets);
        return Ok(());
    }

    let width = width.context("--width is required")?;
    let tier = if low_end {
        DeviceTier::LowEnd
    } else {
        DeviceTier::Standard
    };
    println!("{}", targets.lookup(width, tier));
    Ok(())
}

fn print_table(targets: &TargetTable) {
    let [a, b, c] = targets.edges;
    let rows = [
        format!("w < {a}"),
        format!("{a} <= w < {b}"),
        format!("{b} <= w < {c}"),
        format!("w >= {c}"),
    ];
    println!("{:<18}  {:>7}  {:>8}", "width", "low-end", "standard");
    for (i, label) in rows.iter().enumerate() {
        println!(
            "{label:<18}  {:>7}  {:>8}",
            targets.low_end[i], targets.standard[i]
        );
    }
}

fn cmd_simulate(
    cli: &Cli,
    env: &EnvArgs,
    scenario_path: Option<&Path>,
    duration: Option<u64>,
    sample_every: Option<u64>,
    resizes: &[ResizeEvent],
    json: bool,
) -> Result<()> {
    let mut settings = load_settings(cli)?;
    env.apply(&mut settings);

    if let Some(path) = scenario_path {
        settings.simulation = load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?;
    }
    let scenario: &mut Scenario = &mut settings.simulation;
    if let Some(duration) = duration {
        scenario.duration_ms = duration;
    }
    if let Some(every) = sample_every {
        scenario.sample_every_ms = every;
    }
    scenario.resizes.extend_from_slice(resizes);
    settings.validate().context("invalid simulation settings")?;

    let mut field = build_field(&settings, NullContainer);
    let report = run_scenario(&mut field, &settings.simulation);

    if json {
        let out = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{out}");
    } else {
        println!("{}", report::render_samples(&report));
    }
    Ok(())
}

fn cmd_snapshot(cli: &Cli, env: &EnvArgs, at: u64, json: bool) -> Result<()> {
    let mut settings = load_settings(cli)?;
    env.apply(&mut settings);
    settings.validate().context("invalid settings")?;

    // Replay configured resizes up to the snapshot instant.
    let scenario = Scenario {
        duration_ms: at,
        sample_every_ms: at.max(1),
        resizes: settings
            .simulation
            .resizes
            .iter()
            .copied()
            .filter(|r| r.at_ms <= at)
            .collect(),
    };

    let mut field = build_field(&settings, NullContainer);
    run_scenario(&mut field, &scenario);
    tracing::debug!(population = field.len(), at, "snapshot taken");

    if json {
        let value = report::particles_json(field.population().iter());
        let out = serde_json::to_string_pretty(&value).context("failed to serialize particles")?;
        println!("{out}");
    } else if field.is_empty() {
        println!("(no particles)");
    } else {
        println!("{}", report::render_particles(field.population().iter()));
    }
    Ok(())
}

async fn cmd_run(
    cli: &Cli,
    env: &EnvArgs,
    status_every: u64,
    duration: Option<u64>,
) -> Result<()> {
    let mut settings = load_settings(cli)?;
    env.apply(&mut settings);
    settings.validate().context("invalid settings")?;

    let field = build_field(&settings, RecordingContainer::new());
    if field.is_disabled() {
        tracing::info!("reduced motion requested, no particles will be shown");
    }
    tracing::info!(
        target_count = field.target_count(),
        tier = field.tier().as_str(),
        "starting live particle field"
    );
    live::run_live(field, status_every, duration).await
}
