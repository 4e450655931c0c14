use crate::config::Config;
use crate::error::Result;
use crate::processor::Processor;
use tracing::info;

mod config;
mod error;
mod processor;
mod scrapers;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::new()?;
    let processor = Processor::new(&config)?;
    processor.run().await?;

    info!("Export completed successfully!");
    Ok(())
}
