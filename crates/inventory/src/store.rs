use std::io;

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockpile_core::{DomainError, DomainResult, ItemName};

use crate::log::{ActivityLog, LogEntry};
use crate::storage::{self, InventorySnapshot, StorageError};

/// Threshold used by the low-stock scan when the caller has no preference.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Request: add stock, as received from an untyped source.
///
/// Decoding is where type checks happen: a non-string `item` or a
/// non-integer `qty` is rejected before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub item: String,
    pub qty: i64,
}

impl AddItem {
    pub fn new(item: impl Into<String>, qty: i64) -> Self {
        Self {
            item: item.into(),
            qty,
        }
    }

    pub fn from_json(value: JsonValue) -> DomainResult<Self> {
        let rendered = value.to_string();
        serde_json::from_value(value)
            .map_err(|e| DomainError::validation(format!("invalid input types {rendered}: {e}")))
    }
}

/// Outcome of a successful removal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Stock is left; carries the new quantity.
    Remaining(i64),
    /// Quantity reached zero or below and the entry was deleted.
    Depleted,
}

/// Mutable mapping from item name to quantity on hand.
///
/// Iteration follows insertion order; the low-stock scan, the report and the
/// persisted file all follow it. A depleted item that is added again goes to
/// the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: IndexMap<ItemName, i64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        Self { items: snapshot }
    }

    /// Read `path` and build a store holding exactly its contents.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, StorageError> {
        storage::load(path).map(Self::from_snapshot)
    }

    /// Write the full mapping to `path`, overwriting any existing file.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), StorageError> {
        storage::save(&self.items, path)
    }

    /// Add `qty` units of `item`, returning the new quantity.
    ///
    /// A negative `qty` is a signed adjustment: the entry is kept even when the
    /// result is zero or negative. When `logs` is given, a timestamped entry is
    /// appended on success.
    pub fn add(&mut self, item: &str, qty: i64, logs: Option<&mut ActivityLog>) -> DomainResult<i64> {
        let name = ItemName::new(item).inspect_err(|e| {
            tracing::warn!(item, qty, error = %e, "rejected add");
        })?;

        let current = self.items.get(name.as_str()).copied().unwrap_or(0);
        let updated = current.checked_add(qty).ok_or_else(|| {
            tracing::warn!(item, qty, current, "rejected add: quantity overflow");
            DomainError::invariant(format!("quantity overflow adding {qty} to {item}"))
        })?;

        self.items.insert(name, updated);

        if updated <= 0 {
            tracing::warn!(item, qty, quantity = updated, "stock is not positive after add");
        } else {
            tracing::debug!(item, qty, quantity = updated, "added stock");
        }

        if let Some(logs) = logs {
            logs.record(LogEntry::added(item, qty, Utc::now()));
        }

        Ok(updated)
    }

    /// Apply a decoded [`AddItem`] request.
    pub fn add_item(&mut self, request: &AddItem, logs: Option<&mut ActivityLog>) -> DomainResult<i64> {
        self.add(&request.item, request.qty, logs)
    }

    /// Take `qty` units of `item` out of stock.
    ///
    /// The entry is deleted once its quantity reaches zero or below. A missing
    /// item yields [`DomainError::NotFound`] and leaves the store untouched.
    pub fn remove(&mut self, item: &str, qty: i64) -> DomainResult<Removal> {
        let Some(current) = self.items.get_mut(item) else {
            tracing::warn!(item, qty, "cannot remove: item not in inventory");
            return Err(DomainError::not_found(item));
        };

        let remaining = current.checked_sub(qty).ok_or_else(|| {
            tracing::warn!(item, qty, "rejected remove: quantity overflow");
            DomainError::invariant(format!("quantity overflow removing {qty} from {item}"))
        })?;

        if remaining <= 0 {
            self.items.shift_remove(item);
            tracing::debug!(item, qty, "item depleted and removed");
            return Ok(Removal::Depleted);
        }

        *current = remaining;
        tracing::debug!(item, qty, quantity = remaining, "removed stock");
        Ok(Removal::Remaining(remaining))
    }

    /// Quantity on hand for `item`; missing items are an error, not zero.
    pub fn quantity(&self, item: &str) -> DomainResult<i64> {
        self.items
            .get(item)
            .copied()
            .ok_or_else(|| DomainError::not_found(item))
    }

    /// Items whose quantity is strictly below `threshold`.
    pub fn low_stock(&self, threshold: i64) -> Vec<&str> {
        self.items
            .iter()
            .filter(|(_, qty)| **qty < threshold)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Write the items report (`Items Report`, then `name -> qty` per line).
    pub fn report<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }

    /// Make `snapshot` the entire state of the store.
    pub fn replace_with(&mut self, snapshot: InventorySnapshot) {
        tracing::debug!(items = snapshot.len(), "replacing inventory state");
        self.items = snapshot;
    }

    /// Add every quantity in `snapshot` onto the live store.
    ///
    /// All sums are checked before anything is written, so an overflow leaves
    /// the store unchanged.
    pub fn merge(&mut self, snapshot: InventorySnapshot) -> DomainResult<()> {
        let mut merged = Vec::with_capacity(snapshot.len());
        for (name, qty) in snapshot {
            let current = self.items.get(name.as_str()).copied().unwrap_or(0);
            let updated = current.checked_add(qty).ok_or_else(|| {
                DomainError::invariant(format!("quantity overflow merging {qty} into {name}"))
            })?;
            merged.push((name, updated));
        }

        tracing::debug!(items = merged.len(), "merging snapshot into inventory");
        self.items.extend(merged);
        Ok(())
    }

    /// Detached copy of the current mapping.
    pub fn snapshot(&self) -> InventorySnapshot {
        self.items.clone()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.items.iter().map(|(name, qty)| (name.as_str(), *qty))
    }
}

impl core::fmt::Display for Inventory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Items Report")?;
        for (name, qty) in &self.items {
            writeln!(f, "{name} -> {qty}")?;
        }
        Ok(())
    }
}
