//! Raw encounter data as produced by the sample decoder

use serde::{Deserialize, Serialize};

/// One enemy appearance within one wave of one captured play-through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterRecord {
    pub enemy_id: i64,
    pub level: i64,
    #[serde(default)]
    pub plus: i64,
    #[serde(default)]
    pub drop_item_id: Option<i64>,
    /// Only meaningful when `drop_item_id` is present
    #[serde(default)]
    pub drop_item_level: i64,
}

impl EncounterRecord {
    pub fn new(enemy_id: i64, level: i64, plus: i64) -> Self {
        Self {
            enemy_id,
            level,
            plus,
            drop_item_id: None,
            drop_item_level: 0,
        }
    }

    pub fn with_drop(mut self, item_id: i64, item_level: i64) -> Self {
        self.drop_item_id = Some(item_id);
        self.drop_item_level = item_level;
        self
    }

    pub fn identity(&self) -> EnemyIdentity {
        EnemyIdentity {
            enemy_id: self.enemy_id,
            level: self.level,
        }
    }
}

/// `(enemy_id, level)` - two records with the same identity are the same enemy.
/// `plus` and drops are reconciled per identity, they are not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyIdentity {
    pub enemy_id: i64,
    pub level: i64,
}

/// Encounters of one wave slot, in capture order
pub type Wave = Vec<EncounterRecord>;

/// One full capture of a floor: waves in order
pub type Sample = Vec<Wave>;
