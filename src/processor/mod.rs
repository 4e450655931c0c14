mod crawler;
mod export;
mod player;

pub use self::player::{Player, Statistics};

use self::crawler::{Crawler, HttpFetcher};
use self::export::CsvExporter;
use crate::config::Config;
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;
use url::Url;

pub struct Processor {
    crawler: Crawler<HttpFetcher>,
    exporter: CsvExporter,
    output: PathBuf,
}

impl Processor {
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.args.base_url)?;
        let fetcher = HttpFetcher::new(config.http_client.clone(), base);

        let include_qualification = !config.args.no_qualification;
        let marker =
            include_qualification.then(|| config.args.qualification_marker.clone());

        Ok(Self {
            crawler: Crawler::new(fetcher, config.args.event_slug.clone(), marker),
            exporter: CsvExporter::new(config.args.reference_date, include_qualification),
            output: config.args.output.clone(),
        })
    }

    pub async fn run(&self) -> Result<()> {
        info!("Loading players...");
        let players = self.crawler.run().await?;

        info!("Writing CSV file...");
        self.exporter.export_to_file(&players, &self.output)?;

        info!("Wrote {} players to {}", players.len(), self.output.display());
        Ok(())
    }
}
