//! Shared primitive types used across the entire engine.

/// A stable, unique identifier for any entity in the catalog or ledger.
pub type EntityId = String;

/// A unix timestamp in whole seconds, as persisted in history entries.
pub type Timestamp = i64;
