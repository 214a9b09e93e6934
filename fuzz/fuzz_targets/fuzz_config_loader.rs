#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing and validation may reject input but must never panic.
    if let Ok(cfg) = loadcell_config::load_toml(data) {
        if cfg.validate().is_ok() {
            // A config that validates always names two distinct, in-range pins.
            assert_ne!(cfg.pins.clock, cfg.pins.data);
            assert!(cfg.pins.clock <= loadcell_config::MAX_PIN);
            assert!(cfg.pins.data <= loadcell_config::MAX_PIN);
            assert!(cfg.poll.samples >= 1);
        }
    }
});
