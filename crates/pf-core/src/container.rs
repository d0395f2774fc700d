use std::collections::HashMap;

use serde::Serialize;

use crate::particle::{Particle, ParticleId, Position};

/// Externally owned visual container the field draws into.
pub trait Container {
    fn attach(&mut self, particle: &Particle);
    fn detach(&mut self, id: ParticleId);
    fn reposition(&mut self, id: ParticleId, position: Position);
}

/// Discards every operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullContainer;

impl Container for NullContainer {
    fn attach(&mut self, _particle: &Particle) {}
    fn detach(&mut self, _id: ParticleId) {}
    fn reposition(&mut self, _id: ParticleId, _position: Position) {}
}

/// One container operation, as recorded.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ContainerOp {
    Attach { id: ParticleId },
    Detach { id: ParticleId },
    Reposition { id: ParticleId, position: Position },
}

/// Keeps the attached elements and an ordered log of operations.
#[derive(Debug, Default, Clone)]
pub struct RecordingContainer {
    attached: HashMap<ParticleId, Particle>,
    log: Vec<ContainerOp>,
}

impl RecordingContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn is_attached(&self, id: ParticleId) -> bool {
        self.attached.contains_key(&id)
    }

    pub fn element(&self, id: ParticleId) -> Option<&Particle> {
        self.attached.get(&id)
    }

    pub fn log(&self) -> &[ContainerOp] {
        &self.log
    }

    /// Take the log accumulated so far, leaving it empty.
    pub fn drain_log(&mut self) -> Vec<ContainerOp> {
        std::mem::take(&mut self.log)
    }
}

impl Container for RecordingContainer {
    fn attach(&mut self, particle: &Particle) {
        self.attached.insert(particle.id, particle.clone());
        self.log.push(ContainerOp::Attach { id: particle.id });
    }

    fn detach(&mut self, id: ParticleId) {
        self.attached.remove(&id);
        self.log.push(ContainerOp::Detach { id });
    }

    fn reposition(&mut self, id: ParticleId, position: Position) {
        if let Some(element) = self.attached.get_mut(&id) {
            element.position = position;
        }
        self.log.push(ContainerOp::Reposition { id, position });
    }
}

impl<C: Container + ?Sized> Container for &mut C {
    fn attach(&mut self, particle: &Particle) {
        (**self).attach(particle);
    }

    fn detach(&mut self, id: ParticleId) {
        (**self).detach(id);
    }

    fn reposition(&mut self, id: ParticleId, position: Position) {
        (**self).reposition(id, position);
    }
}
