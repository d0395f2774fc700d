//! Wall-clock driver for `pf run`.
//!
//! The field runs on a current-thread runtime: the loop sleeps until the
//! next timer or status tick, and stdin lines deliver resize signals. EOF,
//! `quit`, ctrl-c, or the optional duration end the run.

use std::time::Duration;

use anyhow::Result;
use pf_core::{Container, ContainerOp, ParticleField, RecordingContainer, Viewport};
use rand::Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveCommand {
    Resize(Viewport),
    Status,
    Quit,
}

/// Parse one stdin line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<LiveCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    match word {
        "resize" => {
            let width = parse_dim(parts.next(), "width")?;
            let height = parse_dim(parts.next(), "height")?;
            Ok(Some(LiveCommand::Resize(Viewport::new(width, height))))
        }
        "status" => Ok(Some(LiveCommand::Status)),
        "quit" | "exit" => Ok(Some(LiveCommand::Quit)),
        other => Err(format!("unknown command '{other}'")),
    }
}

fn parse_dim(token: Option<&str>, name: &str) -> Result<f64, String> {
    let token = token.ok_or_else(|| format!("missing {name}"))?;
    match token.parse::<f64>() {
        Ok(v) if v > 0.0 => Ok(v),
        Ok(v) => Err(format!("{name} must be positive, got {v}")),
        Err(e) => Err(format!("bad {name} '{token}': {e}")),
    }
}

fn status_line<R: Rng, C: Container>(field: &ParticleField<R, C>) -> String {
    let vp = field.environment().viewport;
    format!(
        "t={}ms population={} target={} viewport={}x{}",
        field.now(),
        field.len(),
        field.target_count(),
        vp.width,
        vp.height
    )
}

fn log_ops(ops: Vec<ContainerOp>) {
    for op in ops {
        match op {
            ContainerOp::Attach { id } => tracing::debug!(%id, "attach"),
            ContainerOp::Detach { id } => tracing::debug!(%id, "detach"),
            ContainerOp::Reposition { id, position } => {
                tracing::trace!(%id, x = position.x, y = position.y, "reposition")
            }
        }
    }
}

pub async fn run_live<R: Rng>(
    mut field: ParticleField<R, RecordingContainer>,
    status_every_ms: u64,
    duration_ms: Option<u64>,
) -> Result<()> {
    let status_every_ms = status_every_ms.max(1);
    let start = Instant::now();
    let mut next_status = status_every_ms;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    println!("{}", status_line(&field));

    loop {
        let now_ms = start.elapsed().as_millis() as u64;
        field.advance_to(now_ms);
        log_ops(field.container_mut().drain_log());

        if now_ms >= next_status {
            println!("{}", status_line(&field));
            while next_status <= now_ms {
                next_status += status_every_ms;
            }
        }
        if duration_ms.is_some_and(|d| now_ms >= d) {
            break;
        }

        let mut wake = field.next_wake().unwrap_or(u64::MAX).min(next_status);
        if let Some(d) = duration_ms {
            wake = wake.min(d);
        }
        let deadline = start + Duration::from_millis(wake);

        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => {}
            line = lines.next_line(), if stdin_open => {
                match line? {
                    None => {
                        tracing::info!("stdin closed, stopping");
                        stdin_open = false;
                        if duration_ms.is_none() {
                            break;
                        }
                    }
                    Some(line) => match parse_command(&line) {
                        Ok(Some(LiveCommand::Resize(viewport))) => {
                            field.advance_to(start.elapsed().as_millis() as u64);
                            tracing::info!(
                                width = viewport.width,
                                height = viewport.height,
                                "resize signal"
                            );
                            field.resize(viewport);
                        }
                        Ok(Some(LiveCommand::Status)) => println!("{}", status_line(&field)),
                        Ok(Some(LiveCommand::Quit)) => break,
                        Ok(None) => {}
                        Err(e) => tracing::warn!("ignoring input: {e}"),
                    },
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("interrupted, stopping");
                break;
            }
        }
    }

    println!("{}", status_line(&field));
    let stats = field.stats();
    println!(
        "stopped. created={}, expired={}, evicted={}",
        stats.created, stats.expired, stats.evicted
    );
    Ok(())
}
