//! HostPulse sampler.
//!
//! Reads CPU and per-interface network counters from procfs once per
//! second, converts the deltas between successive snapshots into rate
//! metrics, and publishes them as a JSON utilization report:
//!
//! ```text
//! [<vhost>/]utilization/<topic>  <-  { "cpu": 0.5, "net": { "eth0": { "rx": 500, "tx": 100 } } }
//! ```

pub mod proc;
pub mod publisher;
pub mod rates;
pub mod sampler;
