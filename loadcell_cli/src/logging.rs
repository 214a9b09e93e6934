//! Tracing setup: console layer on stderr (pretty or JSON) plus an optional
//! non-blocking JSON file layer.
//!
//! The file writer flushes on a background thread; the returned guard must
//! live until exit or buffered lines are lost.

use std::io::IsTerminal;
use std::path::Path;

use eyre::WrapErr;
use loadcell_config::{Logging, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tracing_appender::non_blocking::WorkerGuard;

/// Level precedence: RUST_LOG, then --log-level, then `logging.level`, then info.
pub fn init_tracing(
    json: bool,
    cli_level: Option<&str>,
    cfg: &Logging,
) -> eyre::Result<Option<WorkerGuard>> {
    let level = cli_level.or(cfg.level.as_deref()).unwrap_or("info");
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level).wrap_err_with(|| format!("invalid log level '{level}'"))?,
    };

    let ansi = std::io::stderr().is_terminal();
    let (pretty, json_console) = if json {
        (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        )
    } else {
        (
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .with_target(false),
            ),
            None,
        )
    };

    let mut guard = None;
    let file_layer = match &cfg.file {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file '{}' has no file name", path.display()))?;
            let appender = match cfg.rotation {
                Rotation::Never => tracing_appender::rolling::never(dir, name),
                Rotation::Daily => tracing_appender::rolling::daily(dir, name),
                Rotation::Hourly => tracing_appender::rolling::hourly(dir, name),
            };
            let (writer, g) = tracing_appender::non_blocking(appender);
            guard = Some(g);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json_console)
        .with(file_layer)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(guard)
}
