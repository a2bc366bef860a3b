//! The draw engine — one weighted two-stage random selection.
//!
//! Stage one rolls a point in the settings range and finds the rarity band
//! containing it. Stage two picks an item within that band, weighted.
//! Either stage can come up empty; an empty draw is a non-result, not an
//! error.

use crate::catalog::{Item, Rarity, Settings};
use crate::rng::CaseRng;
use serde::{Deserialize, Serialize};

/// One successful draw: the roll that landed, the band it hit, and the
/// item picked inside it. Rolls carry three decimals, matching the
/// persisted history format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    pub roll:   f64,
    pub rarity: Rarity,
    pub item:   Item,
}

/// Find the band containing `roll`.
///
/// Bands are inclusive on BOTH ends, so a roll exactly on a shared
/// boundary of two contiguous bands matches both. The first match in
/// stored catalog order wins. Compatibility contract: existing catalogs
/// depend on this tie-break, do not switch to sorted order.
pub fn band_for_roll(rarities: &[Rarity], roll: f64) -> Option<&Rarity> {
    rarities
        .iter()
        .find(|r| r.min_roll <= roll && roll <= r.max_roll)
}

/// Weighted pick among the drawable items of one rarity, in stored
/// catalog order. Items with weight 0 never participate.
pub fn pick_weighted<'a>(
    items: &'a [Item],
    rarity_id: &str,
    rng: &mut CaseRng,
) -> Option<&'a Item> {
    let candidates: Vec<&Item> = items
        .iter()
        .filter(|i| i.rarity_id == rarity_id && i.weight > 0.0)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let total_weight: f64 = candidates.iter().map(|i| i.weight).sum();
    let point = rng.uniform(0.0, total_weight);

    let mut cumulative = 0.0;
    for &item in &candidates {
        cumulative += item.weight;
        if point <= cumulative {
            return Some(item);
        }
    }
    // Float drift can leave the point just past the final cumulative sum.
    candidates.last().copied()
}

/// Perform one draw against the catalog. Returns None when the roll lands
/// outside every band or the band holds no drawable item.
pub fn draw_once(
    rarities: &[Rarity],
    items: &[Item],
    settings: &Settings,
    rng: &mut CaseRng,
) -> Option<DrawResult> {
    let roll = rng.uniform(settings.roll_min, settings.roll_max);
    let rarity = band_for_roll(rarities, roll)?;
    let item = pick_weighted(items, &rarity.id, rng)?;
    Some(DrawResult {
        roll: round3(roll),
        rarity: rarity.clone(),
        item: item.clone(),
    })
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
