use crate::config::cli::Args;
use crate::error::Result;
use clap::Parser;
use reqwest::Client;

pub(crate) mod cli;

pub struct Config {
    pub args: Args,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        let args = Args::parse();

        // No timeout: a hung request blocks the run, the operator re-runs.
        let http_client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self { args, http_client })
    }
}
