//! CLI entry point for postloader

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postloader")]
#[command(version)]
#[command(about = "Load Markdown blog posts with front-matter", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every post slug in discovery order
    Slugs {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// List posts that load successfully
    #[command(alias = "ls")]
    List {
        /// Print full post records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single post by slug
    Show {
        slug: String,

        /// Print the full post record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-list posts whenever the posts directory changes
    #[command(alias = "w")]
    Watch,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postloader=debug,info"
    } else {
        "postloader=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Slugs { json } => {
            let blog = postloader::Blog::new(&base_dir)?;
            postloader::commands::list::run(&blog, "slugs", json)?;
        }

        Commands::List { json } => {
            let blog = postloader::Blog::new(&base_dir)?;
            postloader::commands::list::run(&blog, "posts", json)?;
        }

        Commands::Show { slug, json } => {
            let blog = postloader::Blog::new(&base_dir)?;
            postloader::commands::show::run(&blog, &slug, json)?;
        }

        Commands::Watch => {
            let blog = postloader::Blog::new(&base_dir)?;
            postloader::commands::watch::watch(&blog).await?;
        }

        Commands::Version => {
            println!("postloader version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
