use casesim_core::catalog::{RarityPatch, SettingsPatch};
use casesim_core::store::CaseStore;

// ── Test helpers ────────────────────────────────────────────────────────────

fn make_store() -> CaseStore {
    CaseStore::in_memory().with_seed(42)
}

// ── Tests ───────────────────────────────────────────────────────────────────

/// The default catalog is four contiguous bands over [0, 100]; adding a
/// band that overlaps Rare [60, 85] must fail and name both rarities.
#[test]
fn overlapping_band_rejected_with_both_names() {
    let mut store = make_store();

    let err = store
        .add_rarity("Shiny".to_string(), 50.0, 70.0, None)
        .expect_err("overlapping band must be rejected");

    let message = err.to_string();
    assert!(
        message.contains("overlap"),
        "expected an overlap message, got: {message}"
    );
    assert!(
        message.contains("Rare") && message.contains("Shiny"),
        "overlap message must name both rarities, got: {message}"
    );
}

/// A rejected add leaves the catalog exactly as it was.
#[test]
fn failed_add_rolls_back_catalog() {
    let mut store = make_store();
    let before = store.state().clone();

    store
        .add_rarity("Shiny".to_string(), 50.0, 70.0, None)
        .expect_err("overlapping band must be rejected");

    assert_eq!(
        *store.state(),
        before,
        "failed validation must leave the aggregate untouched"
    );
}

/// Bands that merely touch (max of one equals min of the next) are legal.
#[test]
fn touching_bands_are_valid() {
    let mut store = make_store();

    store
        .add_rarity("Beyond".to_string(), 100.0, 120.0, None)
        .expect("a band starting exactly at the previous max must pass");
}

/// An inverted band is rejected and the message names the rarity.
#[test]
fn inverted_band_rejected_by_name() {
    let mut store = make_store();

    let err = store
        .add_rarity("Backwards".to_string(), 50.0, 10.0, None)
        .expect_err("min_roll above max_roll must be rejected");

    assert!(
        err.to_string().contains("Backwards"),
        "error must name the offending rarity, got: {err}"
    );
}

/// Settings with roll_min >= roll_max are rejected with the exact message.
#[test]
fn settings_range_must_be_ordered() {
    let mut store = make_store();

    let err = store
        .update_settings(SettingsPatch {
            roll_min: Some(100.0),
            roll_max: Some(100.0),
            ..Default::default()
        })
        .expect_err("roll_min == roll_max must be rejected");

    assert_eq!(err.to_string(), "roll_min must be less than roll_max");
}

/// A failed settings update restores the previous settings in full.
#[test]
fn failed_settings_update_rolls_back() {
    let mut store = make_store();
    let before = store.state().settings.clone();

    store
        .update_settings(SettingsPatch {
            roll_min: Some(500.0),
            ..Default::default()
        })
        .expect_err("roll_min above roll_max must be rejected");

    assert_eq!(store.state().settings, before);
}

/// A failed rarity update restores the previous record in full, even
/// when only one field of the patch was invalid.
#[test]
fn failed_rarity_update_rolls_back() {
    let mut store = make_store();
    let rare_id = store
        .state()
        .rarities
        .iter()
        .find(|r| r.name == "Rare")
        .expect("default catalog has Rare")
        .id
        .clone();
    let before = store.state().clone();

    store
        .update_rarity(
            &rare_id,
            RarityPatch {
                name: Some("Renamed".to_string()),
                min_roll: Some(0.0), // collides with Common [0, 60]
                ..Default::default()
            },
        )
        .expect_err("overlapping update must be rejected");

    assert_eq!(
        *store.state(),
        before,
        "no field of a rejected patch may stick, not even valid ones"
    );
}
