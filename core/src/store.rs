//! The store — owner of the aggregate and the only writer.
//!
//! RULE: Only the store touches the data file. Every operation follows
//! the same sequence: check/mutate, validate if rarities or settings were
//! touched (rolling the change back in full on failure), append exactly
//! one history entry, persist the whole document, return.
//!
//! Persistence is serialize-and-overwrite of one JSON file after every
//! successful mutation. Operation volume is low and interactive, so
//! simplicity wins over incremental writes.

use crate::catalog::{
    default_catalog, Item, ItemPatch, Rarity, RarityPatch, SettingsPatch, DEFAULT_ITEM_WEIGHT,
};
use crate::draw::{draw_once, DrawResult};
use crate::error::{CaseError, CaseResult};
use crate::ledger::HISTORY_CAP;
use crate::rng::CaseRng;
use crate::state::CaseState;
use crate::validate::validate;
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How many draws a single open_case request may perform.
pub const MAX_OPENS_PER_REQUEST: i64 = 100;

pub struct CaseStore {
    path:  Option<PathBuf>, // None for in-memory stores (tests)
    state: CaseState,
    rng:   CaseRng,
}

impl CaseStore {
    /// Open the store backed by the JSON document at `path`.
    ///
    /// A missing or unreadable file falls back to in-memory defaults —
    /// never an error. If the catalog loads empty, the fixed default
    /// catalog is seeded. The document is written once at startup so the
    /// file always reflects the state the store actually runs with.
    pub fn open(path: impl Into<PathBuf>) -> CaseResult<Self> {
        let path = path.into();
        let mut state = load_or_default(&path);
        if state.rarities.is_empty() {
            seed_defaults(&mut state);
        }
        let store = Self {
            path: Some(path),
            state,
            rng: CaseRng::from_entropy(),
        };
        store.save()?;
        Ok(store)
    }

    /// A store with no backing file. Starts from the default catalog.
    pub fn in_memory() -> Self {
        let mut state = CaseState::default();
        seed_defaults(&mut state);
        Self {
            path: None,
            state,
            rng: CaseRng::from_entropy(),
        }
    }

    /// An in-memory store over an explicit aggregate. Replay and test
    /// tooling use this to start from a known document.
    pub fn from_state(state: CaseState) -> Self {
        Self {
            path: None,
            state,
            rng: CaseRng::from_entropy(),
        }
    }

    /// Replace the random source with a deterministically seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = CaseRng::seeded(seed);
        self
    }

    pub fn state(&self) -> &CaseState {
        &self.state
    }

    /// Serialize the aggregate exactly as it would be written to disk.
    pub fn state_json(&self) -> CaseResult<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    // ── Draws ──────────────────────────────────────────────────

    /// Open `times` cases. The count is clamped to [1, 100], never
    /// rejected. The catalog is validated once up front; each draw is
    /// independent and a draw that yields nothing is silently skipped.
    /// One history entry summarizes the whole batch.
    pub fn open_case(&mut self, times: i64) -> CaseResult<Vec<DrawResult>> {
        let times = times.clamp(1, MAX_OPENS_PER_REQUEST) as usize;
        validate(&self.state.rarities, &self.state.settings)?;

        let open_price = self.state.settings.open_price;
        let mut results: Vec<DrawResult> = Vec::new();
        for _ in 0..times {
            let drawn = draw_once(
                &self.state.rarities,
                &self.state.items,
                &self.state.settings,
                &mut self.rng,
            );
            if let Some(result) = drawn {
                self.state.record_draw(&result, open_price);
                results.push(result);
            }
        }

        self.state.append_history(
            "open_case",
            json!({
                "times": times,
                "results": results.iter().take(10).collect::<Vec<_>>(),
                "count_results": results.len(),
            }),
        );
        self.save()?;
        Ok(results)
    }

    // ── Rarities ───────────────────────────────────────────────

    pub fn add_rarity(
        &mut self,
        name: String,
        min_roll: f64,
        max_roll: f64,
        color: Option<String>,
    ) -> CaseResult<()> {
        let entry = Rarity::new(name, min_roll, max_roll, color);
        self.state.rarities.push(entry.clone());
        if let Err(err) = validate(&self.state.rarities, &self.state.settings) {
            self.state.rarities.pop();
            return Err(err);
        }
        self.state.append_history("add_rarity", serde_json::to_value(&entry)?);
        self.save()
    }

    pub fn update_rarity(&mut self, rarity_id: &str, patch: RarityPatch) -> CaseResult<()> {
        let index = self
            .state
            .rarities
            .iter()
            .position(|r| r.id == rarity_id)
            .ok_or_else(|| CaseError::RarityNotFound(rarity_id.to_string()))?;

        let previous = self.state.rarities[index].clone();
        {
            let rarity = &mut self.state.rarities[index];
            if let Some(name) = patch.name {
                rarity.name = name;
            }
            if let Some(min_roll) = patch.min_roll {
                rarity.min_roll = min_roll;
            }
            if let Some(max_roll) = patch.max_roll {
                rarity.max_roll = max_roll;
            }
            if let Some(color) = patch.color {
                rarity.color = color;
            }
        }
        if let Err(err) = validate(&self.state.rarities, &self.state.settings) {
            self.state.rarities[index] = previous;
            return Err(err);
        }

        let payload = serde_json::to_value(&self.state.rarities[index])?;
        self.state.append_history("update_rarity", payload);
        self.save()
    }

    pub fn delete_rarity(&mut self, rarity_id: &str) -> CaseResult<()> {
        if self.state.find_rarity(rarity_id).is_none() {
            return Err(CaseError::RarityNotFound(rarity_id.to_string()));
        }
        if self.state.rarity_in_use(rarity_id) {
            return Err(CaseError::RarityInUse(rarity_id.to_string()));
        }
        self.state.rarities.retain(|r| r.id != rarity_id);
        self.state
            .append_history("delete_rarity", json!({ "rarity_id": rarity_id }));
        self.save()
    }

    // ── Items ──────────────────────────────────────────────────

    pub fn add_item(
        &mut self,
        name: String,
        rarity_id: String,
        weight: Option<f64>,
        image_path: Option<String>,
        description: Option<String>,
    ) -> CaseResult<()> {
        if self.state.find_rarity(&rarity_id).is_none() {
            return Err(CaseError::UnknownRarity(rarity_id));
        }
        let weight = weight.unwrap_or(DEFAULT_ITEM_WEIGHT);
        if weight < 0.0 {
            return Err(CaseError::Validation(
                "item weight must not be negative".to_string(),
            ));
        }
        let entry = Item::new(name, rarity_id, Some(weight), image_path, description);
        self.state.items.push(entry.clone());
        self.state.append_history("add_item", serde_json::to_value(&entry)?);
        self.save()
    }

    pub fn update_item(&mut self, item_id: &str, patch: ItemPatch) -> CaseResult<()> {
        let index = self
            .state
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CaseError::ItemNotFound(item_id.to_string()))?;

        if let Some(rarity_id) = &patch.rarity_id {
            if self.state.find_rarity(rarity_id).is_none() {
                return Err(CaseError::UnknownRarity(rarity_id.clone()));
            }
        }
        if let Some(weight) = patch.weight {
            if weight < 0.0 {
                return Err(CaseError::Validation(
                    "item weight must not be negative".to_string(),
                ));
            }
        }

        let item = &mut self.state.items[index];
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(rarity_id) = patch.rarity_id {
            item.rarity_id = rarity_id;
        }
        if let Some(weight) = patch.weight {
            item.weight = weight;
        }
        if let Some(image_path) = patch.image_path {
            item.image_path = image_path;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }

        let payload = serde_json::to_value(&self.state.items[index])?;
        self.state.append_history("update_item", payload);
        self.save()
    }

    pub fn delete_item(&mut self, item_id: &str) -> CaseResult<()> {
        if self.state.find_item(item_id).is_none() {
            return Err(CaseError::ItemNotFound(item_id.to_string()));
        }
        self.state.items.retain(|i| i.id != item_id);
        self.state.inventory.remove(item_id);
        self.state
            .append_history("delete_item", json!({ "item_id": item_id }));
        self.save()
    }

    // ── Inventory ──────────────────────────────────────────────

    pub fn adjust_inventory(&mut self, item_id: &str, delta: i64) -> CaseResult<()> {
        if self.state.find_item(item_id).is_none() {
            return Err(CaseError::ItemNotFound(item_id.to_string()));
        }
        self.state.adjust_quantity(item_id, delta)?;
        let action = if delta < 0 { "consume_item" } else { "add_inventory" };
        self.state
            .append_history(action, json!({ "item_id": item_id, "delta": delta }));
        self.save()
    }

    // ── Settings ───────────────────────────────────────────────

    pub fn update_settings(&mut self, patch: SettingsPatch) -> CaseResult<()> {
        let previous = self.state.settings.clone();
        if let Some(roll_min) = patch.roll_min {
            self.state.settings.roll_min = roll_min;
        }
        if let Some(roll_max) = patch.roll_max {
            self.state.settings.roll_max = roll_max;
        }
        if let Some(open_price) = patch.open_price {
            self.state.settings.open_price = open_price;
        }
        if let Err(err) = validate(&self.state.rarities, &self.state.settings) {
            self.state.settings = previous;
            return Err(err);
        }
        let payload = serde_json::to_value(&self.state.settings)?;
        self.state.append_history("update_settings", payload);
        self.save()
    }

    // ── History and stats ──────────────────────────────────────

    /// Empty the history log. The clear itself is not recorded — the
    /// entry would be the sole survivor of the wipe it describes.
    pub fn clear_history(&mut self) -> CaseResult<()> {
        self.state.history.clear();
        self.save()
    }

    pub fn reset_stats(&mut self) -> CaseResult<()> {
        self.state.reset_stats();
        self.state.append_history("reset_stats", json!({}));
        self.save()
    }

    // ── Persistence ────────────────────────────────────────────

    /// Write the whole document. In-memory stores skip the write.
    fn save(&self) -> CaseResult<()> {
        if let Some(path) = &self.path {
            let document = serde_json::to_string_pretty(&self.state)?;
            fs::write(path, document)?;
            log::debug!(
                "state saved to {} ({} history entries, cap {})",
                path.display(),
                self.state.history.len(),
                HISTORY_CAP
            );
        }
        Ok(())
    }
}

/// Read the document at `path`, falling back to defaults on any failure.
/// Corrupt or missing files are a startup condition to recover from
/// locally, never an error to surface.
fn load_or_default(path: &Path) -> CaseState {
    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(state) => state,
            Err(err) => {
                log::warn!(
                    "data file {} is not a valid state document, starting from defaults: {err}",
                    path.display()
                );
                CaseState::default()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => CaseState::default(),
        Err(err) => {
            log::warn!(
                "could not read data file {}, starting from defaults: {err}",
                path.display()
            );
            CaseState::default()
        }
    }
}

fn seed_defaults(state: &mut CaseState) {
    let (rarities, items) = default_catalog();
    state.rarities = rarities;
    if state.items.is_empty() {
        state.items = items;
    }
    log::info!(
        "seeded default catalog: {} rarities, {} items",
        state.rarities.len(),
        state.items.len()
    );
}
