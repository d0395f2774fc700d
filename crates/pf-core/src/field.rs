//! The particle lifecycle manager.
//!
//! A [`ParticleField`] keeps a self-replenishing population of decorative
//! particles sized from the viewport width and device tier. Time is virtual:
//! the owner advances the field with [`ParticleField::advance_to`], and every
//! timer that comes due fires in wake order on a single logical timeline.
//!
//! Lifecycle of one particle: drawn, attached, retired after
//! `delay + duration`, and replaced right away if the population is still
//! under target. Viewport resizes are debounced; the settled reaction trims
//! the oldest members or tops the population up, then scatters everyone to
//! fresh positions.

use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use crate::config::FieldConfig;
use crate::container::Container;
use crate::debounce::Debouncer;
use crate::particle::{Particle, ParticleId, Position};
use crate::population::Population;
use crate::scheduler::{Scheduler, TaskId};
use crate::viewport::{DeviceTier, Environment, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    /// One of the staggered startup creations.
    Seed,
    /// Lifetime timer for a particle.
    Retire(ParticleId),
    /// Resize settle window elapsed.
    Settle,
}

/// Running counters for a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldStats {
    /// Particles drawn and attached.
    pub created: u64,
    /// Particles retired by their lifetime timer.
    pub expired: u64,
    /// Particles removed by a resize shrinking the target.
    pub evicted: u64,
    /// Lifetime timers that fired for a particle already gone.
    pub dangling: u64,
    /// Seed creations skipped because the population was already at target.
    pub seeds_skipped: u64,
    /// Resize reactions run.
    pub reactions: u64,
}

pub struct ParticleField<R: Rng, C: Container> {
    env: Environment,
    config: FieldConfig,
    tier: DeviceTier,
    disabled: bool,
    target: usize,
    population: Population,
    scheduler: Scheduler<Task>,
    retire_tasks: HashMap<ParticleId, TaskId>,
    resize: Debouncer,
    now: u64,
    rng: R,
    container: C,
    stats: FieldStats,
}

impl<R: Rng, C: Container> ParticleField<R, C> {
    /// Start a field at time 0.
    ///
    /// Reduced motion disables the field for good: no particles, no timers,
    /// resize signals ignored. Otherwise the initial target is scheduled as
    /// staggered seed creations, the i-th at `i * stagger_ms`.
    pub fn new(env: Environment, config: FieldConfig, rng: R, container: C) -> Self {
        let tier = DeviceTier::classify(&env.device);
        let resize = if config.resize_leading_edge {
            Debouncer::leading(config.settle_window_ms)
        } else {
            Debouncer::trailing(config.settle_window_ms)
        };
        let mut field = Self {
            env,
            tier,
            disabled: env.prefers_reduced_motion,
            target: 0,
            population: Population::new(),
            scheduler: Scheduler::new(),
            retire_tasks: HashMap::new(),
            resize,
            now: 0,
            rng,
            container,
            stats: FieldStats::default(),
            config,
        };

        if field.disabled {
            tracing::debug!("reduced motion requested, particle field disabled");
            return field;
        }

        field.target = field.compute_target();
        for i in 0..field.target {
            let when = (i as u64).saturating_mul(field.config.stagger_ms);
            field.scheduler.schedule_at(when, Task::Seed);
        }
        tracing::debug!(
            target_count = field.target,
            tier = field.tier.as_str(),
            width = field.env.viewport.width,
            "particle field seeded"
        );
        field
    }

    fn compute_target(&self) -> usize {
        self.config
            .targets
            .lookup(self.env.viewport.width, self.tier)
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn target_count(&self) -> usize {
        self.target
    }

    pub fn tier(&self) -> DeviceTier {
        self.tier
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn stats(&self) -> FieldStats {
        self.stats
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Earliest pending timer, if any.
    pub fn next_wake(&self) -> Option<u64> {
        self.scheduler.next_wake()
    }

    /// Whether a resize reaction is waiting for its settle window.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Pending removal timer for a live particle.
    pub fn has_retire_timer(&self, id: ParticleId) -> bool {
        self.retire_tasks
            .get(&id)
            .is_some_and(|&task| self.scheduler.is_pending(task))
    }

    /// Page-side write of the viewport dimensions. Does not signal a resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.env.viewport = viewport;
    }

    /// Resize notification. Carries no payload; the reaction re-reads the
    /// viewport when it runs.
    pub fn notify_resize(&mut self) {
        if self.disabled {
            return;
        }
        let call_now = self
            .resize
            .signal(&mut self.scheduler, self.now, Task::Settle);
        if call_now {
            self.apply_resize();
        }
    }

    /// Write the viewport and signal a resize.
    pub fn resize(&mut self, viewport: Viewport) {
        self.set_viewport(viewport);
        self.notify_resize();
    }

    /// Run every timer due at or before `t`, in wake order, then move the
    /// clock to `t`. Times in the past are ignored.
    pub fn advance_to(&mut self, t: u64) {
        if t < self.now {
            return;
        }
        while let Some((when, task)) = self.scheduler.pop_due(t) {
            self.now = when;
            self.run(task);
        }
        self.now = t;
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Seed => {
                if self.population.len() < self.target {
                    self.create_particle();
                } else {
                    self.stats.seeds_skipped += 1;
                }
            }
            Task::Retire(id) => self.retire(id),
            Task::Settle => {
                if self.resize.settle() {
                    self.apply_resize();
                }
            }
        }
    }

    /// Draw one particle, attach it and start its lifetime timer.
    fn create_particle(&mut self) {
        let particle = Particle::random(&self.env.viewport, &self.config, &mut self.rng);
        let id = particle.id;
        // A zero lifetime would retire and replace within the same instant forever.
        let lifetime = particle.lifetime_ms().max(1);

        self.container.attach(&particle);
        let task = self
            .scheduler
            .schedule_after(self.now, lifetime, Task::Retire(id));
        self.retire_tasks.insert(id, task);
        self.population.push(particle);
        self.stats.created += 1;
        tracing::trace!(%id, at = self.now, lifetime, "particle created");
    }

    fn retire(&mut self, id: ParticleId) {
        self.retire_tasks.remove(&id);
        if self.population.remove(id).is_none() {
            self.stats.dangling += 1;
            tracing::trace!(%id, "lifetime timer for a removed particle");
            return;
        }
        self.container.detach(id);
        self.stats.expired += 1;
        tracing::trace!(%id, at = self.now, "particle retired");

        if self.population.len() < self.target {
            self.create_particle();
        }
    }

    /// The settled resize reaction: recompute the target, evict the oldest
    /// surplus or create the shortfall, then scatter every live particle
    /// over the current viewport.
    pub fn apply_resize(&mut self) {
        if self.disabled {
            return;
        }
        let new_target = self.compute_target();
        let len = self.population.len();

        if new_target < len {
            for particle in self.population.evict_oldest(len - new_target) {
                self.container.detach(particle.id);
                if let Some(task) = self.retire_tasks.remove(&particle.id) {
                    self.scheduler.cancel(task);
                }
                self.stats.evicted += 1;
            }
        } else if new_target > len {
            for _ in 0..new_target - len {
                self.create_particle();
            }
        }

        self.target = new_target;

        for particle in self.population.iter_mut() {
            let position = Position::random(&self.env.viewport, &mut self.rng);
            particle.position = position;
            self.container.reposition(particle.id, position);
        }

        self.stats.reactions += 1;
        tracing::debug!(
            at = self.now,
            from = len,
            target_count = new_target,
            width = self.env.viewport.width,
            "resize settled"
        );
    }
}
