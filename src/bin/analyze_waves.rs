//! Wave Analysis Binary - builds the canonical wave document
//!
//! Reads every captured play-through from the observation store, reconciles
//! them per floor and writes one JSON document.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin analyze_waves -- --data-path data
//! ```
//!
//! ## Environment Variables
//!
//! - DATA_PATH - Data root (default: data), overridden by --data-path
//! - WAVES_DB_PATH - Observation store (default: <DATA_PATH>/game/waves.sqlite3)
//! - WAVES_OUTPUT_PATH - Output document (default: <DATA_PATH>/game/waves.json)
//! - DROP_LEVEL_SOURCE - Level stored on drops: enemy (default) or drop
//! - RUST_LOG - Logging level (optional, default: info)

use dungeon_analysis::analysis_core::{
    CorpusDriver, FloorAnalyzer, JsonCorpusWriter, JsonSampleDecoder, SqliteObservationReader,
    WaveAggregator,
};
use dungeon_analysis::config::AnalyzerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = AnalyzerConfig::from_env()?;

    log::info!("🚀 Starting wave analysis");
    log::info!("   Data path: {}", config.data_path.display());
    log::info!("   Observation store: {}", config.db_path.display());
    log::info!("   Output: {}", config.output_path.display());
    log::info!("   Drop level source: {}", config.drop_level_source.as_str());

    let source = SqliteObservationReader::open(&config.db_path)?;
    let mut sink = JsonCorpusWriter::new(config.output_path.clone());
    let driver = CorpusDriver::new(FloorAnalyzer::new(WaveAggregator::new(
        config.drop_level_source,
    )));

    if let Err(e) = driver.run(&source, &JsonSampleDecoder, &mut sink).await {
        log::error!("❌ Wave analysis failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
