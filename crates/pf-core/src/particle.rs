use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::FieldConfig;
use crate::viewport::Viewport;

/// Opaque handle for one particle instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(Uuid);

impl ParticleId {
    /// Build an id from the injected random source so seeded runs stay
    /// reproducible.
    pub fn random(rng: &mut impl Rng) -> Self {
        let bytes = rng.random::<u128>().to_le_bytes();
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-left offset within the viewport, in px.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Uniform point inside the viewport.
    pub fn random(viewport: &Viewport, rng: &mut impl Rng) -> Self {
        let x = rng.random::<f64>() * viewport.width;
        let y = rng.random::<f64>() * viewport.height;
        Self { x, y }
    }
}

/// A single decorative dot with randomized look and lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: ParticleId,
    pub size: f64,
    pub position: Position,
    pub duration_secs: f64,
    pub delay_secs: f64,
    pub opacity: f64,
}

impl Particle {
    /// Draw a particle inside `viewport`. Attributes are sampled in a fixed
    /// order: size, x, y, duration, delay, opacity, id.
    pub fn random(viewport: &Viewport, config: &FieldConfig, rng: &mut impl Rng) -> Self {
        let size = config.size.sample(rng);
        let position = Position::random(viewport, rng);
        let duration_secs = config.duration_secs.sample(rng);
        let delay_secs = config.delay_secs.sample(rng);
        let opacity = config.opacity.sample(rng);
        let id = ParticleId::random(rng);
        Self {
            id,
            size,
            position,
            duration_secs,
            delay_secs,
            opacity,
        }
    }

    /// Time from creation until the particle is retired, truncated to whole
    /// milliseconds the way a browser timer would.
    pub fn lifetime_ms(&self) -> u64 {
        ((self.duration_secs + self.delay_secs) * 1000.0) as u64
    }

    /// Inline style for the particle's element.
    pub fn css(&self) -> String {
        format!(
            "position: absolute; width: {size}px; height: {size}px; \
             background: rgba(0, 255, 255, {opacity}); border-radius: 50%; \
             left: {x}px; top: {y}px; \
             animation: float {duration}s ease-in-out infinite {delay}s; \
             pointer-events: none; will-change: transform;",
            size = self.size,
            opacity = self.opacity,
            x = self.position.x,
            y = self.position.y,
            duration = self.duration_secs,
            delay = self.delay_secs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_attributes_in_range() {
        let mut rng = rng();
        let cfg = FieldConfig::default();
        let vp = Viewport::new(800.0, 600.0);
        for _ in 0..500 {
            let p = Particle::random(&vp, &cfg, &mut rng);
            assert!((1.0..4.0).contains(&p.size), "size {}", p.size);
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((0.0..600.0).contains(&p.position.y));
            assert!((3.0..7.0).contains(&p.duration_secs));
            assert!((0.0..2.0).contains(&p.delay_secs));
            assert!((0.3..0.8).contains(&p.opacity));
        }
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let cfg = FieldConfig::default();
        let vp = Viewport::default();
        let a = Particle::random(&vp, &cfg, &mut rng());
        let b = Particle::random(&vp, &cfg, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_order_matches_arithmetic() {
        let cfg = FieldConfig::default();
        let vp = Viewport::new(1000.0, 500.0);
        let p = Particle::random(&vp, &cfg, &mut rng());

        let mut r = rng();
        let raw: Vec<f64> = (0..6).map(|_| r.random::<f64>()).collect();
        assert_relative_eq!(p.size, raw[0] * 3.0 + 1.0);
        assert_relative_eq!(p.position.x, raw[1] * 1000.0);
        assert_relative_eq!(p.position.y, raw[2] * 500.0);
        assert_relative_eq!(p.duration_secs, raw[3] * 4.0 + 3.0);
        assert_relative_eq!(p.delay_secs, raw[4] * 2.0);
        assert_relative_eq!(p.opacity, raw[5] * 0.5 + 0.3);
    }

    #[test]
    fn test_lifetime_truncates() {
        let mut p = Particle::random(&Viewport::default(), &FieldConfig::default(), &mut rng());
        p.duration_secs = 3.0;
        p.delay_secs = 1.2345;
        assert_eq!(p.lifetime_ms(), 4234);
    }

    #[test]
    fn test_ids_are_distinct() {
        let mut rng = rng();
        let a = ParticleId::random(&mut rng);
        let b = ParticleId::random(&mut rng);
        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_css_contains_style() {
        let mut p = Particle::random(&Viewport::default(), &FieldConfig::default(), &mut rng());
        p.size = 2.0;
        p.opacity = 0.5;
        p.position = Position { x: 10.0, y: 20.0 };
        p.duration_secs = 4.0;
        p.delay_secs = 1.0;
        let css = p.css();
        assert!(css.contains("width: 2px; height: 2px;"), "{css}");
        assert!(css.contains("rgba(0, 255, 255, 0.5)"));
        assert!(css.contains("left: 10px; top: 20px;"));
        assert!(css.contains("animation: float 4s ease-in-out infinite 1s;"));
        assert!(css.contains("pointer-events: none;"));
    }
}
