use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use noctes_commentarii::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "noctes",
    version,
    about = "Query Wikidata for the keywords, persons, places and commentaries of the Noctes Atticae",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the query URL for a category, without sending it
    Url {
        /// keywords, persons, places, quotes, or commentarii
        key: String,

        /// List the commentaries for this entity instead of the category itself
        #[arg(short, long)]
        entity: Option<String>,
    },

    /// Load a category listing and print its HTML
    List {
        /// keywords, persons, places, quotes, or commentarii
        key: String,
    },

    /// Load the commentaries linked to an entity and print their HTML
    Commentarii {
        /// Entity ID or URI, e.g. Q42
        entity: String,

        /// The category the entity was picked from
        key: String,
    },

    /// Load listings and all commentaries, and write a standalone HTML page
    Page {
        /// Output file; stdout if not given
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Categories to list; may be repeated
        #[arg(short, long, default_value = "keywords")]
        key: Vec<String>,
    },
}

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_format, cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::from_toml_file(path)
            .with_context(|| format!("reading config file {}", path.display()))?,
        None => Config::default(),
    };
    tracing::debug!(endpoint = config.endpoint(), root_item = config.root_item(), "config loaded");

    match cli.command {
        Commands::Url { key, entity } => {
            let builder = QueryBuilder::from_config(&config)?;
            let frame = match entity {
                Some(entity) => QueryFrame::CommentariesFor(EntityId::from_uri(&entity)?),
                None => QueryFrame::Listing,
            };
            println!("{}", builder.build_url(&key, &frame)?);
        }
        Commands::List { key } => {
            let page = Page::from_config(&config)?;
            let rendered = page.load_json(&key).await?;
            println!("{}", rendered.to_html());
        }
        Commands::Commentarii { entity, key } => {
            let page = Page::from_config(&config)?;
            let rendered = page.get_commentarii(&entity, &key).await?;
            println!("{}", rendered.to_html());
        }
        Commands::Page { out, key } => {
            write_page(&config, &key, out).await?;
        }
    }

    Ok(())
}

#[cfg(not(tarpaulin_include))]
async fn write_page(config: &Config, keys: &[String], out: Option<PathBuf>) -> Result<()> {
    let page = Page::from_config(config)?;
    let keys = keys
        .iter()
        .map(|key| CategoryKey::new(key.as_str()))
        .collect::<Result<Vec<_>, QueryError>>()?;
    let html = page.load_document("Noctes Atticae: commentarii", &keys).await;
    match out {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "page written");
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("noctes_commentarii=debug,noctes=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("noctes_commentarii=info,noctes=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
