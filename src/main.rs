mod app;
mod cli;
mod config;
mod constants;
mod fonts;
mod localize;
mod session;

use std::process::ExitCode;

use anyhow::Context;
use cosmic_toast_config::ToastConfig;
use cosmic_toast_util::NotificationText;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::Command;
use crate::config::{PROGRAM, VERSION};
use crate::constants::FAILURE_CODE;

fn main() -> ExitCode {
    color_backtrace::install();
    init_logger();
    localize::localize();

    let command = match cli::parse(std::env::args_os().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{PROGRAM}: {err}");
            eprintln!("{}", cli::usage());
            return ExitCode::from(FAILURE_CODE);
        }
    };

    match command {
        Command::Help => {
            println!("{}", cli::help());
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("{PROGRAM} {VERSION}");
            ExitCode::SUCCESS
        }
        Command::Show(text) => match run(text) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                report(&err);
                ExitCode::from(FAILURE_CODE)
            }
        },
    }
}

/// Show `text` until it is dismissed.
///
/// A dismissed popup exits the process from inside the event loop, so
/// returning at all means the display went away first.
fn run(text: NotificationText) -> anyhow::Result<()> {
    let config = ToastConfig::default();
    tracing::info!(chars = text.len(), corner = ?config.corner, "showing notification");

    app::run(app::Flags { text, config }).context(fl!("error-display"))?;
    anyhow::bail!(fl!("error-closed"))
}

/// Print a fatal error as a single diagnostic line.
pub(crate) fn report(err: &anyhow::Error) {
    tracing::debug!(?err, "fatal error");
    eprintln!("{PROGRAM}: {err:#}");
}

fn init_logger() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    #[cfg(feature = "systemd")]
    if let Ok(journald) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(journald)
            .with(filter)
            .init();
        return;
    }

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();
}
