//! Rate conversion between successive counter snapshots.

use std::collections::BTreeMap;

use tracing::warn;

use hostpulse_common::{Error, IfaceRate, Result, UtilizationReport};

use crate::proc::{CpuCounters, RawSample};

/// CPU utilization fraction over the period between two snapshots.
///
/// `1 - (delta idle / delta uptime)`. Two captures within the same clock
/// tick leave the uptime counter unchanged, which is an error condition
/// rather than a division by zero.
pub fn cpu_utilization(prev: &CpuCounters, cur: &CpuCounters) -> Result<f64> {
    let delta_uptime = cur.uptime - prev.uptime;
    if delta_uptime == 0.0 {
        return Err(Error::ZeroInterval);
    }
    Ok(1.0 - (cur.idle - prev.idle) / delta_uptime)
}

/// Byte rate between two counter readings, truncated toward zero.
pub fn compute_rate(prev: u64, cur: u64, elapsed: f64) -> i64 {
    ((cur as f64 - prev as f64) / elapsed) as i64
}

/// Convert two snapshots separated by `elapsed` wall-clock seconds into a
/// utilization report.
///
/// `elapsed` is the caller's own clock, independent of the counters, and
/// must be strictly positive. Only interfaces present in both snapshots
/// are reported; an interface whose counters went backwards (reset or
/// wraparound) is re-baselined by omitting it for this tick.
pub fn compute_report(
    prev: &RawSample,
    cur: &RawSample,
    elapsed: f64,
) -> Result<UtilizationReport> {
    if !(elapsed > 0.0) {
        return Err(Error::ZeroInterval);
    }

    let cpu = cpu_utilization(&prev.cpu, &cur.cpu)?;

    let mut net = BTreeMap::new();
    for (name, cur_counters) in &cur.net {
        let Some(prev_counters) = prev.net.get(name) else {
            continue;
        };

        if cur_counters.rx < prev_counters.rx || cur_counters.tx < prev_counters.tx {
            warn!(iface = %name, "Counter went backwards, re-baselining interface");
            continue;
        }

        net.insert(
            name.clone(),
            IfaceRate {
                rx: compute_rate(prev_counters.rx, cur_counters.rx, elapsed),
                tx: compute_rate(prev_counters.tx, cur_counters.tx, elapsed),
            },
        );
    }

    Ok(UtilizationReport { cpu, net })
}
