use std::{fs::File, sync::Arc};

use ledger_engine::{
    Config, LedgerService, MemoryAccountStore, MemoryTransactionLog, dlq::LogDLQ, engine::Engine,
    ingestion::CsvReader, report, telemetry,
};

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    // Set up the components
    let config = Config::from_env()?;
    let file = File::open(&config.input)?;

    let ledger = Arc::new(LedgerService::new(
        MemoryAccountStore::new(),
        MemoryTransactionLog::new(),
        config.ledger,
    ));
    let ingestion = CsvReader::new(file, config.ledger.scale);

    // Initialize engine with injected components
    let mut engine = Engine::new(ingestion, Arc::clone(&ledger), LogDLQ::default());
    engine.process().await?;

    report::write_report(&*ledger, std::io::stdout().lock())?;

    Ok(())
}
