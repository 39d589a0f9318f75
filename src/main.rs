// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Map, Value};

use pokedex::commands::*;
use pokedex::dto::*;
use pokedex::{AppError, AppState, ErrorResponse, Settings};

#[derive(Debug, Parser)]
#[command(name = "pokedex", version, about = "Manage the Pokemon catalog")]
struct Cli {
    /// TOML settings file
    #[arg(long, env = "POKEDEX_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides settings)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Page size when `list` omits --limit (overrides settings)
    #[arg(long, global = true)]
    default_limit: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a pokemon
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        no: Option<u32>,
        /// Extra field as key=value; the value is parsed as JSON when possible
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, Value)>,
    },

    /// List pokemon ordered by catalog index
    List {
        #[arg(long)]
        limit: Option<u32>,
        /// Page index
        #[arg(long)]
        offset: Option<u32>,
    },

    /// Find a pokemon by catalog index, id or name
    Get { term: String },

    /// Update the pokemon a term resolves to
    Update {
        term: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        no: Option<u32>,
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, Value)>,
    },

    /// Remove a pokemon by id
    Remove { id: String },

    /// Show database statistics
    Stats,
}

fn parse_attribute(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))?;
    if key.is_empty() {
        return Err(format!("missing key in `{}`", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "pokedex=debug" } else { "pokedex=warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn render<T: Serialize>(value: T) -> Result<Value, ErrorResponse> {
    serde_json::to_value(value).map_err(|e| ErrorResponse::from_app_error(AppError::from(e)))
}

async fn run(state: &AppState, command: Command) -> Result<Value, ErrorResponse> {
    match command {
        Command::Create {
            name,
            no,
            attributes,
        } => {
            let dto = CreatePokemonDto {
                no,
                name,
                attributes: attributes.into_iter().collect::<Map<_, _>>(),
            };
            render(create_pokemon(state, dto).await?)
        }
        Command::List { limit, offset } => {
            render(list_pokemon(state, PaginationDto { limit, offset }).await?)
        }
        Command::Get { term } => render(get_pokemon(state, &term).await?),
        Command::Update {
            term,
            name,
            no,
            attributes,
        } => {
            let dto = UpdatePokemonDto {
                no,
                name,
                attributes: attributes.into_iter().collect::<Map<_, _>>(),
            };
            render(update_pokemon(state, &term, dto).await?)
        }
        Command::Remove { id } => {
            remove_pokemon(state, &id).await?;
            Ok(json!({ "removed": id }))
        }
        Command::Stats => render(database_stats(state).await?),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        settings.database_path = Some(database);
    }
    if let Some(default_limit) = cli.default_limit {
        settings.default_limit = default_limit;
    }
    settings.validate()?;

    let state = AppState::initialize(&settings).context("failed to open the pokedex database")?;

    match run(&state, cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{}", serde_json::to_string_pretty(&error)?);
            Ok(ExitCode::FAILURE)
        }
    }
}
