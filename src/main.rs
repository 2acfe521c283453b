//! Lanai - Main entrypoint.
//!
//! Command line front end for the pattern index. It initializes the logging
//! system, loads configuration, builds an index from a rule file and runs
//! queries against it.

use clap::{Parser, Subcommand};
use lanai_lib::config::{
    global_config, init_global_config, ConfigLoader, LanaiConfig, LogConfig, ENV_PREFIX,
};
use lanai_lib::error::{report, ErrorContext, LanaiError, LanaiResult};
use lanai_lib::data_structures::LanaiIndex;
use lanai_lib::rules::RuleSet;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

/// Command line arguments for Lanai.
#[derive(Parser, Debug)]
#[clap(name = "lanai", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print every rule whose pattern matches a query, most specific first
    Match {
        /// Path to the JSON rule file
        #[clap(short, long, value_parser)]
        rules: PathBuf,

        /// Query as JSON; read from stdin when omitted
        #[clap(short, long)]
        query: Option<String>,
    },

    /// Print the data stored under exactly one pattern
    Get {
        /// Path to the JSON rule file
        #[clap(short, long, value_parser)]
        rules: PathBuf,

        /// Pattern as JSON
        #[clap(short, long)]
        pattern: String,

        /// Print every payload instead of the most recent one
        #[clap(short, long)]
        all: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// One line of `match` output.
#[derive(Serialize)]
struct MatchLine<'a> {
    data: &'a Value,
    specificity: usize,
    insertion_index: u64,
    signature: &'a str,
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> LanaiResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(log.source_location)
        .with_file(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| LanaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn parse_json(text: &str) -> LanaiResult<Value> {
    Ok(serde_json::from_str(text)?)
}

fn read_stdin() -> LanaiResult<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn load_index(rules: &Path) -> LanaiResult<LanaiIndex<Value>> {
    let config = global_config()
        .ok_or_else(|| LanaiError::Custom("Configuration not initialized".to_string()))?;
    let rule_set = RuleSet::from_path(rules)?;
    let index = rule_set.build_index(config.index.to_index_config())?;
    info!(rules = index.len(), path = %rules.display(), "index built");
    Ok(index)
}

fn run(command: Command, loader: &ConfigLoader) -> LanaiResult<()> {
    match command {
        Command::Match { rules, query } => {
            let index = load_index(&rules)?;
            let query = match query {
                Some(query) => parse_json(&query)?,
                None => parse_json(&read_stdin()?)?,
            };

            for m in index.matches(&query) {
                let line = MatchLine {
                    data: m.data,
                    specificity: m.specificity,
                    insertion_index: m.insertion_index,
                    signature: m.signature.as_str(),
                };
                println!("{}", serde_json::to_string(&line)?);
            }
            Ok(())
        }
        Command::Get {
            rules,
            pattern,
            all,
        } => {
            let index = load_index(&rules)?;
            let pattern = parse_json(&pattern)?;

            if all {
                println!("{}", serde_json::to_string(&index.get_all(&pattern))?);
            } else {
                match index.get(&pattern) {
                    Some(data) => println!("{}", serde_json::to_string(data)?),
                    None => {
                        return Err(LanaiError::Custom(format!(
                            "No rule stored under pattern {pattern}"
                        )))
                    }
                }
            }
            Ok(())
        }
        Command::Validate => {
            info!("Validating configuration");
            loader.load()?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = LanaiConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| LanaiError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();
    let loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);

    // Logging settings come from the configuration when it can be read
    let config = loader.load_or_default();
    let log = config
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(&log) {
        eprintln!("{e}");
    }
    lanai_lib::init();

    let result = config
        .map_err(LanaiError::from)
        .and_then(|config| {
            init_global_config(config);
            run(args.command, &loader)
        });

    if let Err(error) = result {
        report(&ErrorContext::new(error, "lanai"));
        process::exit(1);
    }
}
