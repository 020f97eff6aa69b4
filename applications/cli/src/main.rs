/// Shelf - audiobook metadata resolver and tag synchronizer
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use crate::config::ShelfConfig;

#[derive(Parser)]
#[command(name = "shelf", version)]
#[command(about = "Resolve, browse and write back audiobook series metadata", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SHELF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a library folder and print the author/series index
    Scan {
        /// Library folder (defaults to library.root)
        root: Option<PathBuf>,
        /// Print the index as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write title, author and series atoms back into files
    Sync {
        /// Library folder (defaults to library.root)
        root: Option<PathBuf>,
        /// Author whose books are written
        #[arg(long, required_unless_present = "book")]
        author: Option<String>,
        /// Restrict to one series of the author ("Standalone Books" for the rest)
        #[arg(long, requires = "author", conflicts_with = "book")]
        series: Option<String>,
        /// Write a single book
        #[arg(long)]
        book: Option<PathBuf>,
        /// Move every book of --series to this series name
        #[arg(long, requires = "series")]
        rename_series: Option<String>,
    },
    /// Show the raw atoms and the resolved record of one file
    Inspect {
        /// Audio file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf=info,shelf_library=info,shelf_metadata=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ShelfConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan { root, json } => {
            let root = config.root(root)?;
            commands::scan(&config, root, json).await?;
        }
        Commands::Sync {
            root,
            author,
            series,
            book,
            rename_series,
        } => {
            let root = config.root(root)?;
            let selection = commands::Selection {
                author,
                series,
                book,
                rename_series,
            };
            commands::sync(&config, root, selection).await?;
        }
        Commands::Inspect { file } => {
            commands::inspect(&config, &file)?;
        }
    }

    Ok(())
}
