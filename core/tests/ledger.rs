use casesim_core::error::CaseError;
use casesim_core::ledger::HISTORY_CAP;
use casesim_core::store::CaseStore;

// ── Test helpers ────────────────────────────────────────────────────────────

fn make_store() -> CaseStore {
    CaseStore::in_memory().with_seed(17)
}

fn knife_id(store: &CaseStore) -> String {
    store
        .state()
        .items
        .iter()
        .find(|i| i.name == "Old Knife")
        .expect("default catalog has Old Knife")
        .id
        .clone()
}

// ── Inventory adjustment ────────────────────────────────────────────────────

#[test]
fn positive_adjustment_adds_stock() {
    let mut store = make_store();
    let knife = knife_id(&store);

    store.adjust_inventory(&knife, 5).expect("add stock");
    assert_eq!(store.state().inventory.get(&knife), Some(&5));
    assert_eq!(store.state().history[0].action, "add_inventory");
}

#[test]
fn negative_adjustment_consumes_stock() {
    let mut store = make_store();
    let knife = knife_id(&store);

    store.adjust_inventory(&knife, 5).expect("add stock");
    store.adjust_inventory(&knife, -2).expect("consume");

    assert_eq!(store.state().inventory.get(&knife), Some(&3));
    assert_eq!(store.state().history[0].action, "consume_item");
}

/// Driving a quantity below zero fails and changes nothing.
#[test]
fn overdraw_fails_and_leaves_inventory_alone() {
    let mut store = make_store();
    let knife = knife_id(&store);

    store.adjust_inventory(&knife, 2).expect("add stock");
    let err = store
        .adjust_inventory(&knife, -3)
        .expect_err("cannot consume more than held");

    assert!(matches!(err, CaseError::InsufficientQuantity(_)), "got: {err}");
    assert_eq!(
        store.state().inventory.get(&knife),
        Some(&2),
        "failed adjustment must not move the quantity"
    );
}

/// An entry that reaches exactly zero is removed from the map, not kept.
#[test]
fn zero_quantity_entries_are_removed() {
    let mut store = make_store();
    let knife = knife_id(&store);

    store.adjust_inventory(&knife, 2).expect("add stock");
    store.adjust_inventory(&knife, -2).expect("consume all");

    assert!(
        !store.state().inventory.contains_key(&knife),
        "zero quantities are dropped, not stored"
    );
}

#[test]
fn adjusting_unknown_item_is_not_found() {
    let mut store = make_store();

    let err = store
        .adjust_inventory("no-such-item", 1)
        .expect_err("unknown item");
    assert!(matches!(err, CaseError::ItemNotFound(_)), "got: {err}");
}

// ── Stats ───────────────────────────────────────────────────────────────────

/// reset_stats zeroes all four counters and logs itself.
#[test]
fn reset_stats_zeroes_everything() {
    let mut store = make_store();
    store.open_case(20).expect("some draws");
    assert!(store.state().stats.total_opened > 0, "draws landed");

    store.reset_stats().expect("reset");

    let stats = &store.state().stats;
    assert_eq!(stats.total_opened, 0);
    assert_eq!(stats.total_spent, 0.0);
    assert!(stats.by_rarity.is_empty());
    assert!(stats.by_item.is_empty());
    assert_eq!(store.state().history[0].action, "reset_stats");
}

/// Inventory survives a stats reset — only the counters are zeroed.
#[test]
fn reset_stats_keeps_inventory() {
    let mut store = make_store();
    store.open_case(20).expect("some draws");
    let inventory_before = store.state().inventory.clone();

    store.reset_stats().expect("reset");
    assert_eq!(store.state().inventory, inventory_before);
}

// ── History ─────────────────────────────────────────────────────────────────

/// The log never exceeds the cap; the oldest entries fall off first.
#[test]
fn history_is_capped_oldest_first() {
    let mut store = make_store();
    let knife = knife_id(&store);

    // A marker entry that should be evicted once the cap is passed.
    store
        .add_rarity("Marker".to_string(), 200.0, 210.0, None)
        .expect("marker rarity");

    for _ in 0..HISTORY_CAP {
        store.adjust_inventory(&knife, 1).expect("churn");
    }

    let history = &store.state().history;
    assert_eq!(history.len(), HISTORY_CAP);
    assert!(
        history.iter().all(|e| e.action != "add_rarity"),
        "the oldest entry must have been evicted"
    );
}

/// New entries land at the front of the log.
#[test]
fn history_is_newest_first() {
    let mut store = make_store();
    let knife = knife_id(&store);

    store.adjust_inventory(&knife, 1).expect("older entry");
    store.reset_stats().expect("newest entry");

    assert_eq!(store.state().history[0].action, "reset_stats");
    assert_eq!(store.state().history[1].action, "add_inventory");
}

/// clear_history empties the log and — deliberately — records nothing.
#[test]
fn clear_history_leaves_no_trace() {
    let mut store = make_store();
    store.open_case(3).expect("draws");
    assert!(!store.state().history.is_empty());

    store.clear_history().expect("clear");
    assert!(store.state().history.is_empty());
}

/// Every history entry carries an id and a plausible unix timestamp.
#[test]
fn history_entries_are_stamped() {
    let mut store = make_store();
    store.open_case(1).expect("draw");

    let entry = &store.state().history[0];
    assert!(!entry.id.is_empty());
    assert!(
        entry.timestamp > 1_600_000_000,
        "timestamp {} is not unix seconds",
        entry.timestamp
    );
}
