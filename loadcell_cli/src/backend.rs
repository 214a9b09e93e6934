//! Driver selection: Raspberry Pi GPIO with the `hardware` feature, the
//! simulator otherwise.

use loadcell_config::{Config, GainCfg};
use loadcell_hardware::Gain;

pub fn gain_from_cfg(g: GainCfg) -> Gain {
    match g {
        GainCfg::A128 => Gain::A128,
        GainCfg::B32 => Gain::B32,
        GainCfg::A64 => Gain::A64,
    }
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub fn driver(cfg: &Config) -> eyre::Result<loadcell_hardware::HardwareDriver> {
    Ok(loadcell_hardware::HardwareDriver::new(gain_from_cfg(
        cfg.poll.gain,
    )))
}

/// Simulator configured from the environment:
/// - `LOADCELL_SIM_VALUES`: comma-separated readings (last one repeats)
/// - `LOADCELL_SIM_FAIL_AT`: 1-based read that fails with a timeout
/// - `LOADCELL_SIM_OPEN_FAIL`: any value makes opening fail
#[cfg(not(all(feature = "hardware", target_os = "linux")))]
pub fn driver(cfg: &Config) -> eyre::Result<loadcell_hardware::SimulatedDriver> {
    use eyre::WrapErr;

    let gain = gain_from_cfg(cfg.poll.gain);
    tracing::info!(%gain, "no hardware backend compiled in; using simulated hx711");

    let values = match std::env::var("LOADCELL_SIM_VALUES") {
        Ok(s) => parse_values(&s)?,
        Err(_) => vec![0],
    };
    let mut driver = loadcell_hardware::SimulatedDriver::new().with_values(values);
    if let Ok(s) = std::env::var("LOADCELL_SIM_FAIL_AT") {
        let call: u64 = s
            .trim()
            .parse()
            .wrap_err_with(|| format!("LOADCELL_SIM_FAIL_AT: invalid number '{s}'"))?;
        driver = driver.fail_at(call);
    }
    if std::env::var_os("LOADCELL_SIM_OPEN_FAIL").is_some() {
        driver = driver.fail_open(true);
    }
    Ok(driver)
}

#[cfg_attr(all(feature = "hardware", target_os = "linux"), allow(dead_code))]
fn parse_values(s: &str) -> eyre::Result<Vec<i32>> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<i32>()
                .map_err(|e| eyre::eyre!("LOADCELL_SIM_VALUES: invalid integer '{t}': {e}"))
        })
        .collect()
}
