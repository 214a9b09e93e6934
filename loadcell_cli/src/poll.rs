//! Command execution: config overrides, poller assembly, and the poll loop.

use loadcell_config::{Config, GainCfg, OnReadError};
use loadcell_core::conversions::pins_from_cfg;
use loadcell_core::{LineSink, PollPlan, PollSettings, PollerBuilder, RunOutcome, RunSummary};
use loadcell_traits::{Driver, StopSignal};

use crate::cli::{Commands, GainArg, PinArgs, ReadErrorArg};

/// Frames averaged for the tare baseline when a reading uses fewer.
const TARE_SAMPLES: u32 = 10;

fn apply_pins(cfg: &mut Config, pins: &PinArgs) {
    if let Some(p) = pins.clock_pin {
        cfg.pins.clock = p;
    }
    if let Some(p) = pins.data_pin {
        cfg.pins.data = p;
    }
}

/// Command-line flags take precedence over the config file.
pub fn apply_overrides(cfg: &mut Config, cmd: &Commands) {
    match cmd {
        Commands::Poll {
            pins,
            count,
            forever,
            interval_ms,
            samples,
            gain,
            on_read_error,
            max_retries,
            tare,
        } => {
            apply_pins(cfg, pins);
            if *forever {
                cfg.poll.count = 0;
            } else if let Some(n) = count {
                cfg.poll.count = *n;
            }
            if let Some(ms) = interval_ms {
                cfg.poll.interval_ms = *ms;
            }
            if let Some(n) = samples {
                cfg.poll.samples = *n;
            }
            if let Some(g) = gain {
                cfg.poll.gain = match g {
                    GainArg::A128 => GainCfg::A128,
                    GainArg::B32 => GainCfg::B32,
                    GainArg::A64 => GainCfg::A64,
                };
            }
            if let Some(p) = on_read_error {
                cfg.errors.on_read_error = match p {
                    ReadErrorArg::Abort => OnReadError::Abort,
                    ReadErrorArg::Skip => OnReadError::Skip,
                    ReadErrorArg::Retry => OnReadError::Retry,
                };
            }
            if let Some(n) = max_retries {
                cfg.errors.max_retries = *n;
            }
            if *tare {
                cfg.poll.tare = true;
            }
        }
        Commands::SelfCheck { pins } => apply_pins(cfg, pins),
    }
}

pub fn run_poll<D: Driver>(cfg: &Config, driver: &D, stop: StopSignal) -> eyre::Result<RunSummary> {
    let settings = PollSettings::from(cfg);
    let plan = PollPlan::from(&cfg.poll);

    let mut poller = PollerBuilder::new()
        .pins(pins_from_cfg(&cfg.pins))
        .settings(settings)
        .stop(stop)
        .open(driver)?;

    if cfg.poll.tare {
        poller.tare(cfg.poll.samples.max(TARE_SAMPLES))?;
    }

    let mut sink = LineSink::new(std::io::stdout().lock());
    let summary = poller.run(plan.count, plan.interval, &mut sink)?;
    if summary.outcome == RunOutcome::Stopped {
        tracing::info!(polls = summary.polls, "stopped by signal");
    }
    Ok(summary)
}

pub fn self_check<D: Driver>(cfg: &Config, driver: &D) -> eyre::Result<i32> {
    let mut poller = PollerBuilder::new()
        .pins(pins_from_cfg(&cfg.pins))
        .settings(PollSettings::from(cfg))
        .open(driver)?;
    let reading = poller.read_once()?;
    tracing::info!(value = reading.value, pins = %poller.pins(), "self-check ok");
    Ok(reading.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll_cmd() -> Commands {
        Commands::Poll {
            pins: PinArgs {
                clock_pin: Some(17),
                data_pin: None,
            },
            count: Some(7),
            forever: false,
            interval_ms: Some(250),
            samples: None,
            gain: Some(GainArg::B32),
            on_read_error: Some(ReadErrorArg::Skip),
            max_retries: None,
            tare: false,
        }
    }

    #[test]
    fn flags_override_config_values() {
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, &poll_cmd());
        assert_eq!(cfg.pins.clock, 17);
        assert_eq!(cfg.pins.data, 3);
        assert_eq!(cfg.poll.count, 7);
        assert_eq!(cfg.poll.interval_ms, 250);
        assert_eq!(cfg.poll.gain, GainCfg::B32);
        assert_eq!(cfg.errors.on_read_error, OnReadError::Skip);
    }

    #[test]
    fn forever_clears_count() {
        let mut cfg = Config::default();
        let cmd = Commands::Poll {
            pins: PinArgs::default(),
            count: None,
            forever: true,
            interval_ms: None,
            samples: None,
            gain: None,
            on_read_error: None,
            max_retries: None,
            tare: false,
        };
        apply_overrides(&mut cfg, &cmd);
        assert_eq!(cfg.poll.count, 0);
    }
}
