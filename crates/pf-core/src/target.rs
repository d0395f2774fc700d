//! Population sizing: viewport width bucket × device tier.

use serde::{Deserialize, Serialize};

use crate::constants::{LOW_END_TARGETS, STANDARD_TARGETS, WIDTH_EDGES};
use crate::viewport::DeviceTier;

/// Four width buckets split at three edges, one target per bucket and tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetTable {
    /// Ascending bucket edges in px. `width < edges[i]` selects bucket `i`.
    pub edges: [f64; 3],
    pub low_end: [usize; 4],
    pub standard: [usize; 4],
}

impl Default for TargetTable {
    fn default() -> Self {
        Self {
            edges: WIDTH_EDGES,
            low_end: LOW_END_TARGETS,
            standard: STANDARD_TARGETS,
        }
    }
}

impl TargetTable {
    /// Index of the width bucket. Edges are exclusive upper bounds.
    pub fn bucket(&self, width: f64) -> usize {
        self.edges
            .iter()
            .position(|&edge| width < edge)
            .unwrap_or(self.edges.len())
    }

    pub fn lookup(&self, width: f64, tier: DeviceTier) -> usize {
        let bucket = self.bucket(width);
        match tier {
            DeviceTier::LowEnd => self.low_end[bucket],
            DeviceTier::Standard => self.standard[bucket],
        }
    }

    /// Edges must ascend strictly for buckets to be well defined.
    pub fn is_ordered(&self) -> bool {
        self.edges.windows(2).all(|w| w[0] < w[1])
    }
}

/// Target population for a width and tier under the default table.
pub fn target_count(width: f64, tier: DeviceTier) -> usize {
    TargetTable::default().lookup(width, tier)
}
