//! Canonical per-floor summaries written to the output document
//!
//! Field order here is the key order of the persisted JSON.

use serde::{Deserialize, Serialize};

/// A drop observed from an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEntry {
    pub id: i64,
    pub level: i64,
}

/// One reconciled enemy identity within a wave
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistinctEnemy {
    pub id: i64,
    pub level: i64,
    pub drops: Vec<DropEntry>,
    pub plus: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveSummary {
    pub min_enemies: usize,
    pub max_enemies: usize,
    pub enemies: Vec<DistinctEnemy>,
}

/// Reserved for non-waved special encounters; always empty for now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvadeSummary {
    pub id: i64,
    pub level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSummary {
    pub dungeon: i64,
    pub floor: i64,
    pub invades: Vec<InvadeSummary>,
    pub waves: Vec<WaveSummary>,
}

impl FloorSummary {
    pub fn new(dungeon: i64, floor: i64) -> Self {
        Self {
            dungeon,
            floor,
            invades: Vec::new(),
            waves: Vec::new(),
        }
    }
}

/// Every floor summary in ascending dungeon-then-floor order
pub type CorpusResult = Vec<FloorSummary>;
