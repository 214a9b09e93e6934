use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

use loadcell_hardware::error::HwError;
use loadcell_hardware::util::wait_for_data_ready;

#[test]
fn line_already_low_returns_immediately() {
    let waited = wait_for_data_ready(|| false, Duration::ZERO, Duration::from_millis(10)).unwrap();
    assert!(waited < Duration::from_millis(10));
}

#[test]
fn data_ready_success_path() {
    let high = Arc::new(AtomicBool::new(true));
    let high_bg = high.clone();
    // Flip low after a short delay
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(3));
        high_bg.store(false, Ordering::Relaxed);
    });

    let res = wait_for_data_ready(
        || high.load(Ordering::Relaxed),
        Duration::from_millis(500),
        Duration::from_micros(200),
    );
    let waited = res.expect("line went low");
    assert!(waited >= Duration::from_millis(3));
}

#[test]
fn data_ready_timeout_path() {
    let high = Arc::new(AtomicBool::new(true));

    let err = wait_for_data_ready(
        || high.load(Ordering::Relaxed),
        Duration::from_millis(5),
        Duration::from_micros(200),
    )
    .expect_err("expected timeout error");

    match err {
        HwError::DataReadyTimeout => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn timeout_is_not_stretched_by_a_long_poll_step() {
    let start = Instant::now();
    let err = wait_for_data_ready(|| true, Duration::from_millis(10), Duration::from_secs(2));
    assert!(matches!(err, Err(HwError::DataReadyTimeout)));
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test]
fn data_ready_wait_sleeps_between_checks() {
    // With a 1 ms poll step, a 20 ms wait can check the line at most ~21 times.
    let mut checks = 0u32;
    let start = Instant::now();
    let _ = wait_for_data_ready(
        || {
            checks += 1;
            true
        },
        Duration::from_millis(20),
        Duration::from_millis(1),
    );
    assert!(start.elapsed() >= Duration::from_millis(20));
    assert!(checks <= 25, "line polled {checks} times; waiting is spinning");
}
