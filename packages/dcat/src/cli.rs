//! Command-line interface for the DCAT writer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;

use crate::cache::DcatCache;
use crate::catalog::{assemble, CatalogEnvelope, JsonProjector, SearchPage};
use crate::config::DcatConfig;
use crate::defaults::DcatDefaults;
use crate::error::{DcatError, Result};
use crate::writer::{save_catalog, write_json};

/// Geoportal DCAT writer - Convert catalog search results to DCAT-US JSON-LD.
#[derive(Parser)]
#[command(name = "geoportal-dcat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a search-result page (JSON) into a DCAT catalog.
    Convert {
        /// Search-result page JSON file ("-" for stdin)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        defaults: DefaultsArgs,

        /// Emit compact JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },

    /// Manage the DCAT cache.
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Convert a search-result page and store it in the cache.
    Write {
        /// Search-result page JSON file ("-" for stdin)
        input: PathBuf,

        /// Cache directory (default: $DCAT_CACHE_DIR or ~/dcat/cache)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        #[command(flatten)]
        defaults: DefaultsArgs,
    },

    /// Print the most recent cached catalog.
    Show {
        /// Cache directory (default: $DCAT_CACHE_DIR or ~/dcat/cache)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct DefaultsArgs {
    /// YAML file overriding catalog defaults (default: $DCAT_DEFAULTS_FILE)
    #[arg(long = "defaults")]
    pub file: Option<PathBuf>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = DcatConfig::from_env()?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            defaults,
            compact,
        } => convert_command(&config, &input, output.as_deref(), defaults.file, !compact),
        Commands::Cache { command } => match command {
            CacheCommands::Write {
                input,
                cache_dir,
                defaults,
            } => cache_write_command(&config, &input, cache_dir, defaults.file),
            CacheCommands::Show { cache_dir } => cache_show_command(&config, cache_dir),
        },
    }
}

/// Read the input page and assemble its catalog.
fn build_catalog(
    config: &DcatConfig,
    input: &Path,
    defaults_file: Option<PathBuf>,
) -> Result<CatalogEnvelope> {
    let config = match defaults_file {
        Some(file) => config.clone().with_defaults_file(file),
        None => config.clone(),
    };
    let defaults = DcatDefaults::load(config.defaults_path())?;

    let json = if input == Path::new("-") {
        io::read_to_string(io::stdin())?
    } else {
        fs::read_to_string(input).map_err(|e| {
            DcatError::InvalidInput(format!("cannot read {}: {e}", input.display()))
        })?
    };
    let page = SearchPage::from_json_str(&json)?;

    Ok(assemble(&page, &JsonProjector, &defaults))
}

fn convert_command(
    config: &DcatConfig,
    input: &Path,
    output: Option<&Path>,
    defaults_file: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let catalog = build_catalog(config, input, defaults_file)?;

    match output {
        Some(path) => {
            let saved = save_catalog(&catalog, path, pretty)?;
            eprintln!(
                "{} {} datasets to {}",
                style("Wrote").green().bold(),
                style(catalog.dataset.len()).cyan(),
                saved.display()
            );
        }
        None => write_json(&catalog, io::stdout().lock(), pretty)?,
    }

    Ok(())
}

fn cache_write_command(
    config: &DcatConfig,
    input: &Path,
    cache_dir: Option<PathBuf>,
    defaults_file: Option<PathBuf>,
) -> Result<()> {
    let catalog = build_catalog(config, input, defaults_file)?;
    let cache = cache_for(config, cache_dir);
    let committed = cache.store(&catalog, false)?;

    println!(
        "{} {}",
        style("Cached to:").green().bold(),
        committed.display()
    );
    Ok(())
}

fn cache_show_command(config: &DcatConfig, cache_dir: Option<PathBuf>) -> Result<()> {
    let cache = cache_for(config, cache_dir);
    print!("{}", cache.read_latest()?);
    Ok(())
}

fn cache_for(config: &DcatConfig, cache_dir: Option<PathBuf>) -> DcatCache {
    match cache_dir {
        Some(dir) => DcatCache::new(dir),
        None => DcatCache::from_config(config),
    }
}
