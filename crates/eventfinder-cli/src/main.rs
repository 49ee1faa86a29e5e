//! eventfinder CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use eventfinder_cli::cli::{Cli, Command, ConfigAction};
use eventfinder_cli::config::ClientConfig;
use eventfinder_cli::error::{ClientError, ClientResult};
use eventfinder_cli::{Overrides, commands, pipeline};
use eventfinder_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config),
        None => Ok(ClientConfig::load().unwrap_or_default()),
    }
}

async fn run(cli: Cli, config: ClientConfig) -> ClientResult<()> {
    debug!(path = ?cli.config, "configuration loaded");

    let overrides = Overrides {
        strict: cli.strict,
        model: cli.model.clone(),
    };

    match cli.command {
        Command::Search(args) => {
            let orchestrator = pipeline::build_orchestrator(&config, &overrides)?;
            commands::search::run(&orchestrator, &args).await
        }
        Command::Providers => {
            let registry = pipeline::build_registry(&config)?;
            commands::providers::list(&registry, &config)
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
