//! The aggregate — the complete state document the store owns and
//! persists.
//!
//! RULE: No component holds a private copy. Every read and every write
//! goes through the store so validation and persistence stay centralized.
//!
//! Field names and nesting are the persisted wire format; an existing
//! data file from any prior version of this document must round-trip
//! unchanged.

use crate::catalog::{Item, Rarity, Settings};
use crate::ledger::{HistoryEntry, Stats};
use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseState {
    pub rarities:  Vec<Rarity>,
    pub items:     Vec<Item>,
    pub inventory: BTreeMap<EntityId, u64>,
    pub history:   Vec<HistoryEntry>,
    pub stats:     Stats,
    pub settings:  Settings,
}

impl Default for CaseState {
    fn default() -> Self {
        Self {
            rarities: Vec::new(),
            items: Vec::new(),
            inventory: BTreeMap::new(),
            history: Vec::new(),
            stats: Stats::default(),
            settings: Settings::default(),
        }
    }
}

impl CaseState {
    pub fn find_rarity(&self, rarity_id: &str) -> Option<&Rarity> {
        self.rarities.iter().find(|r| r.id == rarity_id)
    }

    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// True if any item still points at the rarity.
    pub fn rarity_in_use(&self, rarity_id: &str) -> bool {
        self.items.iter().any(|i| i.rarity_id == rarity_id)
    }
}
