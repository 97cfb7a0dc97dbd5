//! `lodestone-jobs` CLI - fetch or parse a character's job page as JSON

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lodestone-jobs")]
#[command(about = "Character job progression from the Lodestone, as JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a character's job page and print the parsed record
    Jobs {
        /// Character id
        id: String,

        /// Print single-line JSON
        #[arg(short, long)]
        compact: bool,

        /// Request timeout in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Upstream URL template containing {id} (overrides config)
        #[arg(long)]
        url_template: Option<String>,
    },

    /// Parse a saved page (plain or view-source) without network access
    Parse {
        /// Path to the saved HTML
        file: PathBuf,

        /// Print single-line JSON
        #[arg(short, long)]
        compact: bool,
    },

    /// Print the upstream URL for a character id
    Url {
        /// Character id
        id: String,

        /// Upstream URL template containing {id} (overrides config)
        #[arg(long)]
        url_template: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries JSON only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Jobs {
            id,
            compact,
            timeout,
            url_template,
        } => {
            let config = cmd::load_config(timeout, url_template)?;
            cmd::jobs::cmd_jobs(&id, config, compact).await?;
        }
        Commands::Parse { file, compact } => {
            cmd::parse::cmd_parse(&file, compact)?;
        }
        Commands::Url { id, url_template } => {
            let config = cmd::load_config(None, url_template)?;
            cmd::jobs::cmd_url(&id, &config);
        }
    }

    Ok(())
}
