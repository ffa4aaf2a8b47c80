//! iRODS CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use irods_cli::cli::{Cli, CommandDispatcher};
use irods_cli::session::EnvironmentSource;
use irods_cli::ui::TerminalUI;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout carries only command output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("irods_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("irods_cli=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("irods starting with args: {:?}", cli);

    let mut ui = TerminalUI::new();
    let source = EnvironmentSource;
    let dispatcher = CommandDispatcher::new(&source);

    let code = dispatcher.run(&cli, &mut ui);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
