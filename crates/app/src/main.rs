use anyhow::Context;

use coldstore_app::{AppConfig, WarehouseSession, shell};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("reading configuration")?;
    coldstore_observability::init_with(config.log_format);

    tracing::info!(first_lot = config.first_lot, "warehouse session started");

    let mut session = WarehouseSession::new(&config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell::run(&mut session, stdin.lock(), stdout.lock()).context("command loop failed")?;

    let stats = session.summary_stats();
    tracing::info!(
        entries = session.ledger().entries().len(),
        withdrawals = session.ledger().withdrawals().len(),
        total_bags = stats.total_bags,
        "warehouse session ended"
    );
    Ok(())
}
