use clap::Parser;
use std::path::PathBuf;

use aget::{commands, error};
use aget::core::config::{FetchOptions, DEFAULT_OUTPUT_DIR};
use aget::core::track::DEFAULT_META_NAMESPACE;

#[derive(Parser)]
#[clap(name = "aget")]
#[clap(about = "Download your music from a playlist file")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// A playlist file
    #[clap(value_name = "PLAYLIST")]
    playlist: PathBuf,
    /// The root directory to save your music in
    #[clap(short = 'O', long, default_value = DEFAULT_OUTPUT_DIR)]
    output: String,
    /// Don't draw a progress bar for each file
    #[clap(long)]
    no_progress: bool,
    /// Save files directly in the output root instead of artist/album folders
    #[clap(long)]
    flat: bool,
    /// Print where each track would go without downloading anything
    #[clap(long)]
    dry_run: bool,
    /// Namespace prefix stripped from track meta keys
    #[clap(long, default_value = DEFAULT_META_NAMESPACE)]
    meta_namespace: String,
}

impl From<Cli> for FetchOptions {
    fn from(cli: Cli) -> Self {
        FetchOptions {
            playlist: cli.playlist,
            output: cli.output,
            show_progress: !cli.no_progress,
            full_paths: !cli.flat,
            dry_run: cli.dry_run,
            meta_namespace: cli.meta_namespace,
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = FetchOptions::from(cli);
    commands::fetch::run(&options).map_err(|e| anyhow::anyhow!(e))
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(error::exit_code_of(&e));
    }
}
