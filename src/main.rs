// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


// Allow println! in main.rs for CLI user-facing output (validate, render commands)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use pg_cdc_source::{
    load_config_file, CdcSourceConfig, JsonDeserializer, PostgresSourceBuilder, PreparedRuntime,
    PreparedSource,
};

#[derive(Parser)]
#[command(name = "pg-cdc-source")]
#[command(about = "Assemble and check PostgreSQL change-data-capture source configurations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file and the source it describes
    Validate {
        /// Path to the configuration file to validate
        #[arg(short, long, default_value = "config/source.yaml")]
        config: PathBuf,
    },

    /// Print the connector properties assembled from a configuration file
    Render {
        /// Path to the configuration file
        #[arg(short, long, default_value = "config/source.yaml")]
        config: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Properties)]
        format: OutputFormat,

        /// Print credentials instead of masking them
        #[arg(long)]
        show_secrets: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Properties,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => validate_config(&config),
        Commands::Render {
            config,
            format,
            show_secrets,
        } => render_config(&config, format, show_secrets),
    }
}

/// Load the `.env` file next to the config file, if there is one.
fn load_env_file(config_path: &Path) -> bool {
    let Some(config_dir) = config_path.parent() else {
        return false;
    };
    let env_file = config_dir.join(".env");
    if !env_file.exists() {
        return false;
    }
    match dotenvy::from_path(&env_file) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("Warning: Failed to load .env file: {e}");
            false
        }
    }
}

/// Initialise logging, letting RUST_LOG take precedence over the file's level.
fn init_logging(log_level: &str) {
    let env = env_logger::Env::default().default_filter_or(log_level);
    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        warn!("Logger was already initialised");
    }
}

fn prepare_source(config: CdcSourceConfig) -> Result<PreparedSource<serde_json::Value>> {
    let builder: PostgresSourceBuilder<serde_json::Value> =
        config.source.into_builder(JsonDeserializer);
    let source = builder.build(&PreparedRuntime)?;
    Ok(source)
}

/// Load and prepare a source, initialising logging from its config.
fn load_source(config_path: &Path) -> Result<PreparedSource<serde_json::Value>> {
    let env_file_loaded = load_env_file(config_path);
    let config = load_config_file(config_path)?;

    init_logging(&config.log_level);
    if env_file_loaded {
        info!("Loaded environment variables from .env file");
    }
    info!("Config file: {}", config_path.display());
    debug!("Source configuration: {:?}", config.source);

    prepare_source(config)
}

/// Validate a configuration file
fn validate_config(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[ERROR] Configuration file not found: {}",
            config_path.display()
        );
        std::process::exit(1);
    }

    match load_source(config_path) {
        Ok(source) => {
            let props = source.properties();
            println!("[OK] Configuration is valid");
            println!();
            println!("Summary:");
            for key in [
                "database.hostname",
                "database.port",
                "database.dbname",
                "plugin.name",
                "database.server.name",
            ] {
                println!("  {key}: {}", props.get(key).unwrap_or("-"));
            }
            println!("  Properties: {}", props.len());
            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Configuration is invalid:");
            println!("  {e}");
            std::process::exit(1);
        }
    }
}

/// Print the assembled connector properties
fn render_config(config_path: &Path, format: OutputFormat, show_secrets: bool) -> Result<()> {
    let source = load_source(config_path)?;
    let props = source.properties();

    match format {
        OutputFormat::Properties => print!("{}", props.to_properties_string(show_secrets)),
        OutputFormat::Json => {
            let json = if show_secrets {
                serde_json::to_string_pretty(props)?
            } else {
                serde_json::to_string_pretty(&props.masked())?
            };
            println!("{json}");
        }
    }

    Ok(())
}
