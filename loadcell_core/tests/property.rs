use std::time::Duration;

use loadcell_core::mocks::{ScriptedDriver, VecSink};
use loadcell_core::{PollerBuilder, RunOutcome};
use loadcell_traits::{ManualClock, PinPair};
use proptest::prelude::*;

proptest! {
    #[test]
    fn run_emits_every_value_in_call_order(
        values in prop::collection::vec(-8_388_608i32..=8_388_607, 1..40),
        interval_ms in 0u64..10_000,
    ) {
        let clock = ManualClock::new();
        let mut poller = PollerBuilder::new()
            .pins(PinPair::new(2, 3))
            .with_clock(clock.clone())
            .open(&ScriptedDriver::values(values.clone()))
            .unwrap();
        let mut sink = VecSink::default();
        let n = values.len() as u64;
        let summary = poller
            .run(Some(n), Duration::from_millis(interval_ms), &mut sink)
            .unwrap();

        prop_assert_eq!(summary.outcome, RunOutcome::Completed);
        prop_assert_eq!(summary.emitted, n);
        prop_assert_eq!(sink.values(), values);
        prop_assert_eq!(
            clock.elapsed(),
            Duration::from_millis(interval_ms) * (n as u32 - 1)
        );
    }

    #[test]
    fn averaging_stays_within_sample_range(
        values in prop::collection::vec(-8_388_608i32..=8_388_607, 1..16),
    ) {
        let samples = values.len() as u32;
        let mut poller = PollerBuilder::new()
            .pins(PinPair::new(2, 3))
            .samples(samples)
            .with_clock(ManualClock::new())
            .open(&ScriptedDriver::values(values.clone()))
            .unwrap();
        let v = poller.read_once().unwrap().value;
        let lo = *values.iter().min().unwrap();
        let hi = *values.iter().max().unwrap();
        prop_assert!(lo <= v && v <= hi);
    }
}
