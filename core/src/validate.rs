//! Catalog validation — the guard in front of every rarity/settings change.
//!
//! RULE: The store calls validate() before committing any change that
//! touches rarities or settings. A failing validation means the attempted
//! change is rolled back in full, never partially applied.

use crate::catalog::{Rarity, Settings};
use crate::error::{CaseError, CaseResult};

/// Check that the roll range and rarity bands are well-formed and that no
/// two bands overlap. Rules run in a fixed order:
///
/// 1. `roll_min < roll_max`
/// 2. every rarity has `min_roll <= max_roll`
/// 3. bands sorted by `(min_roll, max_roll)` must not overlap — each
///    band's `min_roll` must be at or past the previous band's `max_roll`
pub fn validate(rarities: &[Rarity], settings: &Settings) -> CaseResult<()> {
    if settings.roll_min >= settings.roll_max {
        return Err(CaseError::Validation(
            "roll_min must be less than roll_max".to_string(),
        ));
    }

    for rarity in rarities {
        if rarity.min_roll > rarity.max_roll {
            return Err(CaseError::Validation(format!(
                "rarity {} has min_roll greater than max_roll",
                rarity.name
            )));
        }
    }

    let mut bands: Vec<(f64, f64, &str)> = rarities
        .iter()
        .map(|r| (r.min_roll, r.max_roll, r.name.as_str()))
        .collect();
    bands.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    for pair in bands.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.0 < prev.1 {
            return Err(CaseError::Validation(format!(
                "ranges for {} and {} overlap",
                prev.2, next.2
            )));
        }
    }

    Ok(())
}
