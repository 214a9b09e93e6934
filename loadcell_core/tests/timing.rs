//! Real-clock pacing: gaps are at least the interval and the wait does not
//! burn CPU.

use std::io;
use std::time::{Duration, Instant};

use loadcell_core::mocks::ScriptedDriver;
use loadcell_core::{PollerBuilder, Reading};
use loadcell_traits::PinPair;

#[test]
fn real_gaps_are_at_least_the_interval() {
    let interval = Duration::from_millis(40);
    let mut poller = PollerBuilder::new()
        .pins(PinPair::new(2, 3))
        .open(&ScriptedDriver::values([10, -5, 0]))
        .unwrap();

    let mut stamps = Vec::new();
    let mut sink = |r: &Reading| -> io::Result<()> {
        stamps.push((r.value, Instant::now()));
        Ok(())
    };
    poller.run(Some(3), interval, &mut sink).unwrap();

    assert_eq!(stamps.len(), 3);
    for pair in stamps.windows(2) {
        assert!(pair[1].1.duration_since(pair[0].1) >= interval);
    }
}

#[cfg(target_os = "linux")]
fn thread_cpu_time() -> Duration {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_THREAD_CPUTIME_ID, &mut ts) };
    assert_eq!(rc, 0);
    Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
}

#[cfg(target_os = "linux")]
#[test]
fn waiting_does_not_spin_a_core() {
    let interval = Duration::from_millis(200);
    let mut poller = PollerBuilder::new()
        .pins(PinPair::new(2, 3))
        .open(&ScriptedDriver::values([1, 2, 3]))
        .unwrap();
    let mut sink = loadcell_core::mocks::VecSink::default();

    let cpu0 = thread_cpu_time();
    let wall0 = Instant::now();
    poller.run(Some(3), interval, &mut sink).unwrap();
    let wall = wall0.elapsed();
    let cpu = thread_cpu_time() - cpu0;

    assert!(wall >= interval * 2);
    // A spinning wait would burn ~400 ms of CPU here.
    assert!(cpu < Duration::from_millis(100), "used {cpu:?} CPU over {wall:?}");
}
