//! `loadcell` binary: poll an HX711 and print readings, one per line.
//!
//! Stdout carries readings only; logs and diagnostics go to stderr.
mod backend;
mod cli;
mod error_fmt;
mod logging;
mod poll;

use std::process::ExitCode;

use clap::Parser;
use eyre::WrapErr;
use loadcell_config::Config;
use loadcell_traits::StopSignal;

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    let _ = color_eyre::install();

    match real_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "exiting with error");
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", format_error_json(&err));
            } else {
                eprintln!("{}", humanize(&err));
            }
            ExitCode::from(exit_code_for_error(&err))
        }
    }
}

fn load_config(cli: &Cli) -> eyre::Result<Config> {
    match &cli.config {
        Some(path) => loadcell_config::load_file(path),
        None => Ok(Config::default()),
    }
}

fn real_main(cli: Cli) -> eyre::Result<()> {
    let mut cfg = load_config(&cli)?;
    poll::apply_overrides(&mut cfg, &cli.cmd);
    cfg.validate()
        .wrap_err("invalid configuration after applying command-line overrides")?;

    let _log_guard = logging::init_tracing(cli.json, cli.log_level.as_deref(), &cfg.logging)?;

    let stop = StopSignal::new();
    {
        let stop = stop.clone();
        if let Err(e) = ctrlc::set_handler(move || stop.trigger()) {
            tracing::warn!(error = %e, "failed to install Ctrl-C handler; polling cannot be interrupted cleanly");
        }
    }

    let driver = backend::driver(&cfg)?;
    match cli.cmd {
        Commands::Poll { .. } => {
            poll::run_poll(&cfg, &driver, stop)?;
        }
        Commands::SelfCheck { .. } => {
            let value = poll::self_check(&cfg, &driver)?;
            println!("ok {value}");
        }
    }
    Ok(())
}
