use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Base URL of the statistics site
    #[arg(long, default_value = "http://www.weltfussball.at")]
    pub base_url: String,

    /// Tournament slug used in the player listing URL
    #[arg(long, default_value = "wm-2018-in-russland")]
    pub event_slug: String,

    /// URL marker identifying the qualification tournament of the event
    #[arg(long, default_value = "wm-quali")]
    pub qualification_marker: String,

    /// Reference date for age calculation (ISO format)
    #[arg(long, default_value = "2018-06-14")]
    pub reference_date: NaiveDate,

    /// Path of the CSV report to write
    #[arg(long, default_value = "players.csv")]
    pub output: PathBuf,

    /// Skip qualification pages and leave the qualification columns out
    #[arg(long)]
    pub no_qualification: bool,
}
