use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

/// A utilization report published by the sampler.
///
/// Wire format (JSON):
///
/// ```text
/// { "cpu": <float>, "net": { "<iface>": { "rx": <int>, "tx": <int> }, ... } }
/// ```
///
/// `cpu` is the utilization fraction over the sampling period; `net` maps
/// interface names (trailing delimiter stripped) to byte rates truncated
/// toward zero. Interface keys serialize in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub cpu: f64,
    pub net: BTreeMap<String, IfaceRate>,
}

/// Per-interface throughput in bytes per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfaceRate {
    pub rx: i64,
    pub tx: i64,
}

/// Consumer-side view of an inbound payload.
///
/// Every field is optional so presence can be validated by hand: a missing
/// top-level field rejects the whole message while a missing per-interface
/// field rejects only that interface.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireReport {
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub net: Option<BTreeMap<String, WireIfaceRate>>,
}

/// Per-interface entry of a [`WireReport`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WireIfaceRate {
    #[serde(default)]
    pub rx: Option<i64>,
    #[serde(default)]
    pub tx: Option<i64>,
}

/// Encode a report to its JSON wire form.
pub fn encode(report: &UtilizationReport) -> Result<Vec<u8>> {
    serde_json::to_vec(report).map_err(Into::into)
}

/// Decode an inbound payload into the lenient consumer-side view.
pub fn decode_wire(data: &[u8]) -> serde_json::Result<WireReport> {
    serde_json::from_slice(data)
}
