//! The ledger — inventory, running stats, and the bounded history log.
//!
//! RULE: Every mutating store operation appends exactly one history entry.
//! The log is newest-first, capped, and append-only apart from the
//! explicit full clear.

use crate::draw::DrawResult;
use crate::error::{CaseError, CaseResult};
use crate::state::CaseState;
use crate::types::{EntityId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Oldest entries past this count are dropped on every append.
pub const HISTORY_CAP: usize = 500;

/// Aggregate counters across all successful draws. Only reset_stats
/// zeroes them; deleting an item keeps its historical tallies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_opened: u64,
    pub total_spent:  f64,
    pub by_rarity:    BTreeMap<EntityId, u64>,
    pub by_item:      BTreeMap<EntityId, u64>,
}

/// One line of the history log. The payload is free-form JSON shaped by
/// the action that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id:        EntityId,
    pub timestamp: Timestamp,
    pub action:    String,
    pub payload:   serde_json::Value,
}

impl HistoryEntry {
    pub fn new(action: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp(),
            action: action.into(),
            payload,
        }
    }
}

impl CaseState {
    /// Book one successful draw: inventory +1 and all four counters.
    pub fn record_draw(&mut self, result: &DrawResult, open_price: f64) {
        *self.inventory.entry(result.item.id.clone()).or_insert(0) += 1;
        self.stats.total_opened += 1;
        self.stats.total_spent += open_price;
        *self
            .stats
            .by_rarity
            .entry(result.rarity.id.clone())
            .or_insert(0) += 1;
        *self.stats.by_item.entry(result.item.id.clone()).or_insert(0) += 1;
    }

    /// Apply a manual inventory adjustment. Quantities never go negative;
    /// an entry that reaches zero is removed, not kept at zero.
    pub fn adjust_quantity(&mut self, item_id: &str, delta: i64) -> CaseResult<()> {
        let current = self.inventory.get(item_id).copied().unwrap_or(0) as i64;
        let next = current + delta;
        if next < 0 {
            return Err(CaseError::InsufficientQuantity(item_id.to_string()));
        }
        if next == 0 {
            self.inventory.remove(item_id);
        } else {
            self.inventory.insert(item_id.to_string(), next as u64);
        }
        Ok(())
    }

    /// Zero all four counters.
    pub fn reset_stats(&mut self) {
        self.stats = Stats::default();
    }

    /// Prepend a history entry, then truncate to the cap.
    pub fn append_history(&mut self, action: &str, payload: serde_json::Value) {
        self.history.insert(0, HistoryEntry::new(action, payload));
        self.history.truncate(HISTORY_CAP);
    }
}
