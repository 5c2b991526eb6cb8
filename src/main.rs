//! verbatimctl - a command-line client for the Verbatim cloud API.
//!
//! Authenticates with an API key downloaded from the Verbatim console
//! (Console > Keys) and calls the "who am I" endpoint to show which
//! organization the key belongs to.

mod api;
mod auth;
mod config;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::{ApiClient, ApiConfig, ApiError, DEFAULT_BASE_URL};
use auth::{CredentialStore, KeyLoader, KeyMaterial, Session};
use config::Config;

#[derive(Parser)]
#[command(
    name = "verbatimctl",
    about = "Client for the Verbatim cloud API",
    long_about = "Authenticates against the Verbatim cloud API with a locally stored key \
                  and queries the \"who am I\" endpoint for token metadata."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to a key.json downloaded from the console
    #[arg(long, global = true)]
    key: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Call the "who am I" endpoint and print the key's organization (default)
    Whoami,

    /// Manage the locally stored API key
    Key {
        #[command(subcommand)]
        command: KeyCommand,
    },
}

#[derive(Subcommand)]
enum KeyCommand {
    /// Validate a key file and store it in the OS keychain
    Import { path: PathBuf },

    /// Remove the stored key from the OS keychain
    Forget,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Set up logging with environment-based filter
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Whoami) {
        Command::Whoami => whoami(&config, cli.key.as_deref(), cli.base_url.as_deref()).await,
        Command::Key { command } => match command {
            KeyCommand::Import { path } => import_key(&config, &path),
            KeyCommand::Forget => forget_key(&config),
        },
    }
}

/// Load key, init session, configure the client, fire the call.
async fn whoami(
    config: &Config,
    key_override: Option<&Path>,
    base_url_override: Option<&str>,
) -> Result<()> {
    let key = load_key(config, key_override)?;
    if let Some(issued_at) = key.created_at {
        debug!(issued_at = %issued_at, "key issued");
    }

    let mut session = Session::new();
    session.init(key);
    info!(organization = %session.organization_id()?, "session initialized");
    let token = session.token()?.to_string();

    let base_url = base_url_override
        .map(str::to_string)
        .or_else(|| std::env::var("VERBATIM_BASE_URL").ok())
        .or_else(|| config.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let client = ApiClient::new(ApiConfig::new(base_url, token))?;
    let token_info = client.whoami().await?;

    if let Some(expires_at) = token_info.expires_at {
        debug!(expires_at = %expires_at, "token expiry reported by service");
    }

    println!("WhoAmI succeeded");
    println!("{}", token_info.organization_id);
    Ok(())
}

/// Resolve the key source: flag, environment, config, keychain, then
/// the default key.json location.
fn load_key(config: &Config, key_override: Option<&Path>) -> Result<KeyMaterial> {
    if let Some(path) = key_override {
        return KeyLoader::from_path(path)
            .with_context(|| format!("failed to load key from {}", path.display()));
    }

    if let Ok(path) = std::env::var("VERBATIM_KEY_FILE") {
        return KeyLoader::from_path(Path::new(&path))
            .with_context(|| format!("failed to load key from {path}"));
    }

    if let Some(ref path) = config.key_path {
        return KeyLoader::from_path(path)
            .with_context(|| format!("failed to load key from {}", path.display()));
    }

    if let Some(ref org) = config.organization_id {
        if CredentialStore::has_key(org) {
            debug!(organization = %org, "using key from OS keychain");
            let contents = CredentialStore::get(org)?;
            return KeyLoader::from_json(&contents).context("stored key document is invalid");
        }
    }

    let default_path = Config::default_key_path()?;
    if default_path.exists() {
        return KeyLoader::from_path(&default_path)
            .with_context(|| format!("failed to load key from {}", default_path.display()));
    }

    anyhow::bail!(
        "no API key found; pass --key <path>, set VERBATIM_KEY_FILE, \
         or run `verbatimctl key import <path>`"
    )
}

/// Validate a downloaded key document and store it in the OS keychain
fn import_key(config: &Config, path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let key = KeyLoader::from_json(&contents).context("key document is invalid")?;

    CredentialStore::store(&key.organization_id, &contents)?;

    let mut config = config.clone();
    config.organization_id = Some(key.organization_id.clone());
    config.save().context("failed to save configuration")?;

    println!("Imported key for organization {}", key.organization_id);
    Ok(())
}

/// Remove the imported key from the OS keychain
fn forget_key(config: &Config) -> Result<()> {
    let org = config
        .organization_id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("no imported key to forget"))?;

    CredentialStore::delete(&org)?;

    let mut config = config.clone();
    config.organization_id = None;
    config.save().context("failed to save configuration")?;

    println!("Removed stored key for organization {org}");
    Ok(())
}

/// Print the failure to stderr. API call failures get the full
/// status/body/headers report before the error trace.
fn report_error(err: &anyhow::Error) {
    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        eprintln!("WhoAmI call failed");
        if let Some(status) = api_err.status() {
            eprintln!("Status code: {status}");
        }
        if let ApiError::Status { body, headers, .. } = api_err {
            eprintln!("Response body: {body}");
            eprintln!("Response headers:");
            for (name, value) in headers {
                eprintln!("  {}: {}", name, value.to_str().unwrap_or("<non-text value>"));
            }
        }
    }
    eprintln!("Error: {err:#}");
}
