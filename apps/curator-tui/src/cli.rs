use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "curator")]
#[command(about = "Curate the compounds reported by an article")]
#[command(version)]
pub struct Cli {
    /// Page location to open, fetched from the backend (e.g. /article/4821)
    pub location: Option<String>,

    /// Hydrate from a page state JSON file instead of the backend
    #[arg(long, conflicts_with = "location")]
    pub page: Option<PathBuf>,

    /// Configuration file (TOML or JSON); defaults to the user config dir
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Write logs here instead of the default data dir
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
