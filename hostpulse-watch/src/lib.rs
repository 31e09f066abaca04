//! HostPulse watcher.
//!
//! Subscribes to one or more utilization topics and folds every inbound
//! report into a running current/min/max summary per metric stream, kept
//! separately for each routing key. An updated summary table is printed
//! after each accepted message.

pub mod aggregator;
pub mod history;
pub mod subscriber;
pub mod table;
