use stockpile_inventory::InventoryConfig;

fn main() -> anyhow::Result<()> {
    stockpile_observability::init();

    let config = InventoryConfig::from_env()?;
    let stdout = std::io::stdout();

    stockpile_cli::demo::run(&config, stdout.lock())?;
    Ok(())
}
