use std::fmt::Write;

use pf_core::{Particle, TimelineReport};

/// Fixed-width table of timeline samples.
pub fn render_samples(report: &TimelineReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "tier:       {}\ndisabled:   {}",
        report.tier.as_str(),
        report.disabled
    );
    let _ = writeln!(
        out,
        "{:>8}  {:>10}  {:>6}  {:>7}  {:>7}  {:>7}",
        "t_ms", "population", "target", "created", "expired", "evicted"
    );
    for s in &report.samples {
        let pending = if s.resize_pending { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:>8}  {:>10}  {:>6}  {:>7}  {:>7}  {:>7}{pending}",
            s.t, s.population, s.target, s.created, s.expired, s.evicted
        );
    }
    let stats = &report.stats;
    let _ = write!(
        out,
        "totals:     created={}, expired={}, evicted={}, reactions={}",
        stats.created, stats.expired, stats.evicted, stats.reactions
    );
    out
}

/// One line per particle: id, then its inline style.
pub fn render_particles<'a>(particles: impl Iterator<Item = &'a Particle>) -> String {
    particles
        .map(|p| format!("{} {}", p.id, p.css()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn particles_json<'a>(particles: impl Iterator<Item = &'a Particle>) -> serde_json::Value {
    let items: Vec<serde_json::Value> = particles
        .map(|p| {
            serde_json::json!({
                "id": p.id,
                "size": p.size,
                "x": p.position.x,
                "y": p.position.y,
                "duration_secs": p.duration_secs,
                "delay_secs": p.delay_secs,
                "opacity": p.opacity,
                "css": p.css(),
            })
        })
        .collect();
    serde_json::Value::Array(items)
}
