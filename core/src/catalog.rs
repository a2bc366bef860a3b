//! Catalog records — rarities, items, and the global roll settings.
//!
//! RULE: Records are explicit typed structs, never open-ended maps.
//! Required fields are checked where a record enters the catalog
//! (see store.rs); nothing here relies on default-fill behavior.
//!
//! Field names are the persisted wire format and must not change.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_RARITY_COLOR: &str = "#888888";
pub const DEFAULT_ITEM_WEIGHT: f64 = 1.0;

/// A probability band of the roll range. A roll landing inside
/// `[min_roll, max_roll]` (inclusive on both ends) hits this tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rarity {
    pub id:       EntityId,
    pub name:     String,
    pub min_roll: f64,
    pub max_roll: f64,
    pub color:    String,
}

impl Rarity {
    /// Mint a new rarity with a fresh id.
    pub fn new(name: impl Into<String>, min_roll: f64, max_roll: f64, color: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            min_roll,
            max_roll,
            color: color.unwrap_or_else(|| DEFAULT_RARITY_COLOR.to_string()),
        }
    }
}

/// A drop candidate. Weight is the relative likelihood within its tier;
/// weight 0 keeps the item in the catalog but makes it undrawable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id:          EntityId,
    pub name:        String,
    pub rarity_id:   EntityId,
    pub weight:      f64,
    pub image_path:  String,
    pub description: String,
}

impl Item {
    /// Mint a new item with a fresh id.
    pub fn new(
        name: impl Into<String>,
        rarity_id: impl Into<EntityId>,
        weight: Option<f64>,
        image_path: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            rarity_id: rarity_id.into(),
            weight: weight.unwrap_or(DEFAULT_ITEM_WEIGHT),
            image_path: image_path.unwrap_or_default(),
            description: description.unwrap_or_default(),
        }
    }
}

/// Partial update for a rarity. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RarityPatch {
    #[serde(default)]
    pub name:     Option<String>,
    #[serde(default)]
    pub min_roll: Option<f64>,
    #[serde(default)]
    pub max_roll: Option<f64>,
    #[serde(default)]
    pub color:    Option<String>,
}

/// Partial update for an item. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name:        Option<String>,
    #[serde(default)]
    pub rarity_id:   Option<EntityId>,
    #[serde(default)]
    pub weight:      Option<f64>,
    #[serde(default)]
    pub image_path:  Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for the global settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default)]
    pub roll_min:   Option<f64>,
    #[serde(default)]
    pub roll_max:   Option<f64>,
    #[serde(default)]
    pub open_price: Option<f64>,
}

/// Global roll settings. Singleton inside the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub roll_min:   f64,
    pub roll_max:   f64,
    pub open_price: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roll_min: 0.0,
            roll_max: 100.0,
            open_price: 1.0,
        }
    }
}

/// The catalog a fresh store starts with: four contiguous tiers and one
/// item per tier. Seeded whenever the rarity list loads empty.
pub fn default_catalog() -> (Vec<Rarity>, Vec<Item>) {
    let rarities = vec![
        Rarity::new("Common", 0.0, 60.0, Some("#b0b0b0".to_string())),
        Rarity::new("Rare", 60.0, 85.0, Some("#4f8cff".to_string())),
        Rarity::new("Epic", 85.0, 97.0, Some("#bb6eff".to_string())),
        Rarity::new("Legendary", 97.0, 100.0, Some("#ff9f1a".to_string())),
    ];
    let items = vec![
        Item::new("Old Knife", rarities[0].id.clone(), Some(10.0), None, Some("A plain find".to_string())),
        Item::new("Gleaming Pistol", rarities[1].id.clone(), Some(6.0), None, Some("A rare find".to_string())),
        Item::new("Crystal Sword", rarities[2].id.clone(), Some(3.0), None, Some("Highly prized".to_string())),
        Item::new("Dragon Crown", rarities[3].id.clone(), Some(1.0), None, Some("Almost never drops".to_string())),
    ];
    (rarities, items)
}
