// # zonemgr
//
// Command-line DNS manager for Cloudflare accounts.
//
// This binary is a thin integration layer: it parses arguments, loads
// and validates the configuration (fatal before any network call when
// the credential is missing), wires the collaborators, and dispatches to
// the command implementations. Everything with behavior worth testing
// lives in zonemgr-core.
//
// ## Exit codes
//
// - 0: success
// - 1: configuration error (missing/invalid configuration, bad flags)
// - 2: runtime error (provider rejection, network failure, ...)

mod cli;
mod commands;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Command};
use commands::Ctx;
use zonemgr_core::{Error, ManagerConfig};

/// Exit codes for the different termination scenarios
#[derive(Debug, Clone, Copy)]
enum AppExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<AppExitCode> for ExitCode {
    fn from(code: AppExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            eprintln!(
                "Invalid log level '{}' (valid: trace, debug, info, warn, error)",
                other
            );
            return AppExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return AppExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            output::error(&format!("Failed to create runtime: {}", e));
            return AppExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => AppExitCode::Success.into(),
        Err(e) => {
            output::error(&format!("Error: {:#}", e));
            exit_code_for(&e).into()
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // The wizard is the one command that runs without a configuration
    if matches!(cli.command, Command::Setup) {
        return commands::setup::run(&cli.config).await;
    }

    let config = ManagerConfig::load(&cli.config).await?;
    let ctx = Ctx::new(config)?;
    commands::dispatch(ctx, cli.command).await
}

/// Configuration problems exit 1; everything else is a runtime error
fn exit_code_for(e: &anyhow::Error) -> AppExitCode {
    match e.downcast_ref::<Error>() {
        Some(Error::ConfigMissing(_)) | Some(Error::Config(_)) => AppExitCode::ConfigError,
        _ => AppExitCode::RuntimeError,
    }
}
