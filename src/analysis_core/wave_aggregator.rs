//! Per-wave reconciliation of encounter records across samples

use super::encounter::{EncounterRecord, EnemyIdentity};
use super::summary::{DistinctEnemy, DropEntry, WaveSummary};
use std::collections::{HashMap, HashSet};

/// Which field supplies the level stored on an accepted drop
///
/// Drops are always deduplicated on the recorded `(drop_item_id, drop_item_level)`,
/// and a stored entry is never repeated. `Enemy` stores the enemy's own level on
/// the drop, which is what the published wave documents have always contained.
/// `Drop` stores the recorded drop level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropLevelSource {
    #[default]
    Enemy,
    Drop,
}

impl DropLevelSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropLevelSource::Enemy => "enemy",
            DropLevelSource::Drop => "drop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "enemy" => Some(DropLevelSource::Enemy),
            "drop" => Some(DropLevelSource::Drop),
            _ => None,
        }
    }
}

/// Merges the same wave slot of every sample into one `WaveSummary`
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveAggregator {
    drop_level_source: DropLevelSource,
}

impl WaveAggregator {
    pub fn new(drop_level_source: DropLevelSource) -> Self {
        Self { drop_level_source }
    }

    /// Aggregate one wave slot
    ///
    /// `waves` holds this slot's encounters from each contributing sample. Enemy
    /// counts are taken per sample; identities are grouped over the flattened
    /// encounters and emitted in first-occurrence order.
    pub fn aggregate_wave(&self, waves: &[&[EncounterRecord]]) -> WaveSummary {
        let min_enemies = waves.iter().map(|w| w.len()).min().unwrap_or(0);
        let max_enemies = waves.iter().map(|w| w.len()).max().unwrap_or(0);

        let enemies = group_by_identity(waves)
            .into_iter()
            .map(|(identity, instances)| self.reconcile(identity, &instances))
            .collect();

        WaveSummary {
            min_enemies,
            max_enemies,
            enemies,
        }
    }

    fn reconcile(&self, identity: EnemyIdentity, instances: &[&EncounterRecord]) -> DistinctEnemy {
        // Disagreement collapses to 0 rather than a vote
        let plus = match instances.first() {
            Some(first) if instances.iter().all(|i| i.plus == first.plus) => first.plus,
            _ => 0,
        };

        let mut seen = HashSet::new();
        let mut drops = Vec::new();
        for instance in instances {
            // Item id 0 is the capture's "nothing dropped" marker
            let Some(item_id) = instance.drop_item_id.filter(|&id| id != 0) else {
                continue;
            };
            if !seen.insert((item_id, instance.drop_item_level)) {
                continue;
            }
            let level = match self.drop_level_source {
                DropLevelSource::Enemy => instance.level,
                DropLevelSource::Drop => instance.drop_item_level,
            };
            let entry = DropEntry { id: item_id, level };
            if !drops.contains(&entry) {
                drops.push(entry);
            }
        }

        DistinctEnemy {
            id: identity.enemy_id,
            level: identity.level,
            drops,
            plus,
        }
    }
}

/// Single pass over all encounters, keyed by identity, preserving first-seen order
fn group_by_identity<'a>(
    waves: &[&'a [EncounterRecord]],
) -> Vec<(EnemyIdentity, Vec<&'a EncounterRecord>)> {
    let mut slots: HashMap<EnemyIdentity, usize> = HashMap::new();
    let mut groups: Vec<(EnemyIdentity, Vec<&'a EncounterRecord>)> = Vec::new();

    for record in waves.iter().copied().flat_map(|w| w.iter()) {
        let identity = record.identity();
        match slots.get(&identity) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                slots.insert(identity, groups.len());
                groups.push((identity, vec![record]));
            }
        }
    }

    groups
}
