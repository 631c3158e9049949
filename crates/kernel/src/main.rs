//! Folio CLI
//!
//! Runs the startup bootstrap into an in-memory registry and inspects the
//! result.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use folio_kernel::cli;
use folio_kernel::config::Config;
use folio_kernel::manifest::Manifest;
use folio_kernel::{Bootstrap, Registry};

/// Content type and role registry.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Manifest with extra content types and roles (overrides FOLIO_MANIFEST).
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the bootstrap and print a summary.
    Bootstrap,
    /// List registered content types.
    Types {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// List roles and their capabilities.
    Roles {
        /// Print JSON instead of a list.
        #[arg(long)]
        json: bool,
    },
    /// Check whether a role grants a capability (exit status 1 if not).
    Check { role: String, capability: String },
}

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if args.manifest.is_some() {
        config.manifest = args.manifest;
    }

    let mut bootstrap = Bootstrap::new();
    if let Some(path) = &config.manifest {
        let manifest = Manifest::load(path)?;
        info!(
            path = %path.display(),
            content_types = manifest.content_types.len(),
            roles = manifest.roles.len(),
            "manifest loaded"
        );
        bootstrap = bootstrap.with_manifest(manifest);
    }

    let registry = Registry::from_config(&config);
    bootstrap.run(&registry).context("bootstrap failed")?;

    let mut out = io::stdout().lock();
    match args.command.unwrap_or(Command::Bootstrap) {
        Command::Bootstrap => cli::cmd_summary(&registry, &mut out)?,
        Command::Types { json } => cli::cmd_types(&registry, json, &mut out)?,
        Command::Roles { json } => cli::cmd_roles(&registry, json, &mut out)?,
        Command::Check { role, capability } => {
            if !cli::cmd_check(&registry, &role, &capability, &mut out)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
