//! The request surface — one command per external use case.
//!
//! Variants are the wire contract: the tag and field names below are
//! what any front end sends, one JSON object per request. Never remove
//! or rename a variant.

use crate::catalog::{ItemPatch, RarityPatch, SettingsPatch};
use crate::types::EntityId;
use serde::{Deserialize, Serialize};

fn default_times() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum CaseCommand {
    GetState,

    OpenCase {
        #[serde(default = "default_times")]
        times: i64,
    },

    AddRarity {
        name:     String,
        min_roll: f64,
        max_roll: f64,
        #[serde(default)]
        color:    Option<String>,
    },
    UpdateRarity {
        rarity_id: EntityId,
        #[serde(flatten)]
        patch:     RarityPatch,
    },
    DeleteRarity {
        rarity_id: EntityId,
    },

    AddItem {
        name:        String,
        rarity_id:   EntityId,
        #[serde(default)]
        weight:      Option<f64>,
        #[serde(default)]
        image_path:  Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    UpdateItem {
        item_id: EntityId,
        #[serde(flatten)]
        patch:   ItemPatch,
    },
    DeleteItem {
        item_id: EntityId,
    },

    AdjustInventory {
        item_id: EntityId,
        delta:   i64,
    },

    UpdateSettings {
        #[serde(flatten)]
        patch: SettingsPatch,
    },

    ClearHistory,
    ResetStats,
}
