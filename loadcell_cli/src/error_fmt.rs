//! Human-readable error descriptions and structured JSON error formatting.

use loadcell_core::{PollError, ReadFault};

/// Exit codes. clap exits with 2 on usage errors, so config problems share it.
pub const EXIT_GENERIC: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INIT: u8 = 3;
pub const EXIT_READ: u8 = 4;
pub const EXIT_OUTPUT: u8 = 5;

fn is_config_error(lower: &str) -> bool {
    lower.contains("invalid configuration")
        || lower.contains("parse config")
        || lower.contains("read config")
        || lower.contains("invalid log level")
}

fn poll_label(poll: u64) -> String {
    if poll == 0 {
        "Tare".to_string()
    } else {
        format!("Poll {poll}")
    }
}

fn describe_read(poll: u64, fault: &ReadFault) -> String {
    let what = poll_label(poll);
    match fault {
        ReadFault::Timeout => format!(
            "What happened: {what} failed: the HX711 did not signal data-ready in time.\nLikely causes: DOUT/SCK swapped or not wired, no power/ground on the module, or the timeout is shorter than one conversion (100 ms at 10 SPS).\nHow to fix: Check the wiring and pins, raise hardware.read_timeout_ms, or set errors.on_read_error to \"skip\" or \"retry\"."
        ),
        ReadFault::InvalidData(why) => format!(
            "What happened: {what} failed: the HX711 returned an invalid frame ({why}).\nLikely causes: Electrical noise on long wires, a loose DOUT connection, or another process toggling the clock pin.\nHow to fix: Shorten or shield the wires and make sure nothing else drives the pins; \"retry\" tolerates occasional bad frames."
        ),
        ReadFault::Hardware(msg) => format!(
            "What happened: {what} failed with a hardware error ({msg}).\nLikely causes: GPIO access lost during polling.\nHow to fix: Re-run with --log-level=debug for details."
        ),
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(pe) = err.downcast_ref::<PollError>() {
        return match pe {
            PollError::Initialization(msg) => format!(
                "What happened: Could not open the HX711 ({msg}).\nLikely causes: Wrong clock/data pins, pins held by another process, or no permission to access GPIO.\nHow to fix: Check [pins] in the config (or --clock-pin/--data-pin), stop other users of the pins, and run as a user with GPIO access."
            ),
            PollError::Read { poll, fault } => describe_read(*poll, fault),
            PollError::Output(msg) => format!(
                "What happened: Could not write readings ({msg}).\nLikely causes: Standard output was closed, for example by a pipe reader that exited.\nHow to fix: Keep the consumer running for the whole run, or lower --count."
            ),
            PollError::Build(be) => format!(
                "What happened: Invalid poller settings ({be}).\nLikely causes: Missing or out-of-range values in the config or flags.\nHow to fix: Edit the config file, then rerun."
            ),
            PollError::State(msg) => format!(
                "What happened: {msg}.\nLikely causes: Internal sequencing error.\nHow to fix: Re-run with --log-level=debug and report the log."
            ),
        };
    }

    let msg = format!("{err:#}");
    let lower = msg.to_ascii_lowercase();

    if is_config_error(&lower) {
        return format!(
            "What happened: Configuration is invalid ({msg}).\nLikely causes: Out-of-range values, equal clock and data pins, or a typo in the TOML.\nHow to fix: Edit the config file or flags and try again."
        );
    }

    if lower.contains("loadcell_sim_") {
        return format!(
            "What happened: Simulator settings are invalid ({msg}).\nHow to fix: Fix the LOADCELL_SIM_* environment variables."
        );
    }

    // Generic fallback
    format!(
        "Something went wrong.\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map errors to stable exit codes.
pub fn exit_code_for_error(err: &eyre::Report) -> u8 {
    if let Some(pe) = err.downcast_ref::<PollError>() {
        return match pe {
            PollError::Initialization(_) => EXIT_INIT,
            PollError::Read { .. } => EXIT_READ,
            PollError::Output(_) => EXIT_OUTPUT,
            PollError::Build(_) => EXIT_CONFIG,
            PollError::State(_) => EXIT_GENERIC,
        };
    }
    if is_config_error(&format!("{err:#}").to_ascii_lowercase()) {
        return EXIT_CONFIG;
    }
    EXIT_GENERIC
}

pub fn reason_name(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<PollError>() {
        Some(PollError::Initialization(_)) => "InitializationError",
        Some(PollError::Read { .. }) => "ReadError",
        Some(PollError::Output(_)) => "OutputError",
        Some(PollError::Build(_)) => "ConfigError",
        Some(PollError::State(_)) => "StateError",
        None if exit_code_for_error(err) == EXIT_CONFIG => "ConfigError",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = reason_name(err);
    let message = humanize(err);
    match err.downcast_ref::<PollError>() {
        Some(PollError::Read { poll, fault }) => json!({
            "reason": reason,
            "poll": poll,
            "fault": fault.to_string(),
            "message": message,
        })
        .to_string(),
        _ => json!({ "reason": reason, "message": message }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_poll() {
        let err = eyre::Report::new(PollError::Read {
            poll: 3,
            fault: ReadFault::Timeout,
        });
        assert!(humanize(&err).contains("Poll 3 failed"));
        assert_eq!(exit_code_for_error(&err), EXIT_READ);
    }

    #[test]
    fn tare_failure_is_labelled() {
        let err = eyre::Report::new(PollError::Read {
            poll: 0,
            fault: ReadFault::Timeout,
        });
        assert!(humanize(&err).starts_with("What happened: Tare failed"));
    }

    #[test]
    fn wrapped_config_errors_map_to_exit_2() {
        let err = eyre::eyre!("pins.clock and pins.data must differ")
            .wrap_err("invalid configuration after applying command-line overrides");
        assert_eq!(exit_code_for_error(&err), EXIT_CONFIG);
        assert_eq!(reason_name(&err), "ConfigError");
        assert!(humanize(&err).contains("must differ"));
    }

    #[test]
    fn json_read_error_has_poll_field() {
        let err = eyre::Report::new(PollError::Read {
            poll: 2,
            fault: ReadFault::InvalidData("DOUT low after gain pulses".into()),
        });
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(v["reason"], "ReadError");
        assert_eq!(v["poll"], 2);
    }
}
