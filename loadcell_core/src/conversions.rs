//! `From` implementations bridging `loadcell_config` types to `loadcell_core` types.

use std::time::Duration;

use loadcell_config::OnReadError;

use crate::config::{PollPlan, PollSettings, ReadErrorPolicy};

// ── ReadErrorPolicy ──────────────────────────────────────────────────────────

impl From<&loadcell_config::ErrorsCfg> for ReadErrorPolicy {
    fn from(c: &loadcell_config::ErrorsCfg) -> Self {
        match c.on_read_error {
            OnReadError::Abort => ReadErrorPolicy::Abort,
            OnReadError::Skip => ReadErrorPolicy::Skip,
            OnReadError::Retry => ReadErrorPolicy::Retry {
                max_retries: c.max_retries,
            },
        }
    }
}

// ── PollSettings ─────────────────────────────────────────────────────────────

impl From<&loadcell_config::Config> for PollSettings {
    fn from(c: &loadcell_config::Config) -> Self {
        Self {
            read_timeout: Duration::from_millis(c.hardware.read_timeout_ms),
            samples: c.poll.samples,
            policy: (&c.errors).into(),
        }
    }
}

// ── PollPlan ─────────────────────────────────────────────────────────────────

impl From<&loadcell_config::PollCfg> for PollPlan {
    fn from(c: &loadcell_config::PollCfg) -> Self {
        Self {
            count: (c.count > 0).then_some(c.count),
            interval: Duration::from_millis(c.interval_ms),
        }
    }
}

// ── PinPair ──────────────────────────────────────────────────────────────────

pub fn pins_from_cfg(c: &loadcell_config::Pins) -> loadcell_traits::PinPair {
    loadcell_traits::PinPair::new(c.clock, c.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_means_until_stopped() {
        let cfg = loadcell_config::load_toml("[poll]\ncount = 0\ninterval_ms = 20\n").unwrap();
        let plan = PollPlan::from(&cfg.poll);
        assert_eq!(plan.count, None);
        assert_eq!(plan.interval, Duration::from_millis(20));
    }

    #[test]
    fn retry_policy_carries_budget() {
        let cfg = loadcell_config::load_toml(
            "[errors]\non_read_error = \"retry\"\nmax_retries = 7\n",
        )
        .unwrap();
        let settings = PollSettings::from(&cfg);
        assert_eq!(settings.policy, ReadErrorPolicy::Retry { max_retries: 7 });
        assert_eq!(settings.read_timeout, Duration::from_millis(500));
    }
}
