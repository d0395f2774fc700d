use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::particle::{Particle, ParticleId};

/// Live particles in insertion order. The front is the oldest member.
///
/// Each insertion is a separate call, so no two members share an insertion
/// point; eviction order is exactly push order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Population {
    members: VecDeque<Particle>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn push(&mut self, particle: Particle) {
        self.members.push_back(particle);
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.members.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.members.iter().find(|p| p.id == id)
    }

    /// Remove one member wherever it sits. `None` if it is already gone.
    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let idx = self.members.iter().position(|p| p.id == id)?;
        self.members.remove(idx)
    }

    /// Remove up to `count` members from the front, oldest first.
    pub fn evict_oldest(&mut self, count: usize) -> Vec<Particle> {
        let count = count.min(self.members.len());
        self.members.drain(..count).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.members.iter_mut()
    }

    pub fn ids(&self) -> Vec<ParticleId> {
        self.members.iter().map(|p| p.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::viewport::Viewport;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn make_population(n: usize) -> Population {
        let mut rng = SmallRng::seed_from_u64(42);
        let cfg = FieldConfig::default();
        let vp = Viewport::default();
        let mut pop = Population::new();
        for _ in 0..n {
            pop.push(Particle::random(&vp, &cfg, &mut rng));
        }
        pop
    }

    #[test]
    fn test_push_and_len() {
        let pop = make_population(5);
        assert_eq!(pop.len(), 5);
        assert!(!pop.is_empty());
    }

    #[test]
    fn test_remove_middle() {
        let mut pop = make_population(3);
        let ids = pop.ids();
        let removed = pop.remove(ids[1]).expect("present");
        assert_eq!(removed.id, ids[1]);
        assert_eq!(pop.ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut pop = make_population(2);
        let id = pop.ids()[0];
        pop.remove(id);
        assert!(pop.remove(id).is_none());
        assert!(!pop.contains(id));
    }

    #[test]
    fn test_evict_oldest_first() {
        let mut pop = make_population(6);
        let ids = pop.ids();
        let evicted: Vec<_> = pop.evict_oldest(4).into_iter().map(|p| p.id).collect();
        assert_eq!(evicted, ids[..4].to_vec());
        assert_eq!(pop.ids(), ids[4..].to_vec());
    }

    #[test]
    fn test_evict_more_than_len() {
        let mut pop = make_population(2);
        assert_eq!(pop.evict_oldest(10).len(), 2);
        assert!(pop.is_empty());
    }
}
