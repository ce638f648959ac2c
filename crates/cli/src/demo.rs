//! Fixed demonstration sequence against a fresh inventory.
//!
//! Domain failures (bad input, missing items) are logged and the run goes on.
//! File failures end the run with an error.

use std::io::Write;

use anyhow::Context;
use serde_json::json;

use stockpile_inventory::{ActivityLog, AddItem, Inventory, InventoryConfig, storage};

/// Run the demonstration, writing user-facing output to `out`.
///
/// Returns the final inventory state so callers can inspect it.
pub fn run<W: Write>(config: &InventoryConfig, mut out: W) -> anyhow::Result<Inventory> {
    let mut inventory = Inventory::new();
    let mut logs = ActivityLog::new();

    for (item, qty) in [("apple", 10), ("banana", -2)] {
        if let Err(err) = inventory.add(item, qty, Some(&mut logs)) {
            tracing::error!(item, qty, error = %err, "add failed");
        }
    }

    // Deliberately malformed: numeric name, textual quantity.
    let malformed = json!({ "item": 123, "qty": "ten" });
    if let Err(err) = AddItem::from_json(malformed)
        .and_then(|request| inventory.add_item(&request, Some(&mut logs)))
    {
        tracing::error!(error = %err, "add failed");
    }

    for (item, qty) in [("apple", 3), ("orange", 1)] {
        if let Err(err) = inventory.remove(item, qty) {
            tracing::error!(item, qty, error = %err, "remove failed");
        }
    }

    match inventory.quantity("apple") {
        Ok(qty) => writeln!(out, "Apple stock: {qty}")?,
        Err(err) => tracing::error!(error = %err, "apple stock lookup failed"),
    }

    let low = inventory.low_stock(config.low_stock_threshold);
    writeln!(out, "Low items: {}", low.join(", "))?;

    inventory
        .save(&config.path)
        .with_context(|| format!("saving inventory to {}", config.path.display()))?;

    let snapshot = storage::load(&config.path)
        .with_context(|| format!("loading inventory from {}", config.path.display()))?;
    inventory.replace_with(snapshot);

    inventory.report(&mut out)?;

    for entry in &logs {
        tracing::info!(entry = %entry, "activity");
    }

    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> InventoryConfig {
        InventoryConfig {
            path: dir.path().join("inventory.json"),
            ..InventoryConfig::default()
        }
    }

    #[test]
    fn demonstration_prints_expected_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let mut out = Vec::new();

        let inventory = run(&config, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Apple stock: 7\n\
             Low items: banana\n\
             Items Report\n\
             apple -> 7\n\
             banana -> -2\n"
        );
        assert_eq!(inventory.len(), 2);
        assert!(!inventory.contains("orange"));
    }

    #[test]
    fn demonstration_persists_final_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let inventory = run(&config, std::io::sink()).unwrap();

        assert_eq!(Inventory::load(&config.path).unwrap(), inventory);
    }

    #[test]
    fn unwritable_path_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = InventoryConfig {
            path: dir.path().join("missing").join("inventory.json"),
            ..InventoryConfig::default()
        };

        let err = run(&config, std::io::sink()).unwrap_err();
        assert!(err.to_string().contains("saving inventory"));
    }
}
