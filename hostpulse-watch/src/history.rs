//! Running summary state for metric streams.

use std::collections::BTreeMap;

/// Current/min/max record for one metric stream.
///
/// `min` starts at the +infinity sentinel and `max` at zero, so the first
/// observed value becomes current, max and min at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeStat {
    pub current: f64,
    pub max: f64,
    pub min: f64,
}

impl Default for RangeStat {
    fn default() -> Self {
        Self {
            current: 0.0,
            max: 0.0,
            min: f64::INFINITY,
        }
    }
}

impl RangeStat {
    /// Fold one value: max/min move on breach, current unconditionally.
    pub fn observe(&mut self, value: f64) {
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
        self.current = value;
    }
}

/// Receive and transmit streams of one network interface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IfaceHistory {
    pub rx: RangeStat,
    pub tx: RangeStat,
}

/// Running summary of every stream seen under one routing key.
///
/// Interface entries are created lazily on first sighting. There is one
/// `StatsHistory` per routing key, owned by the consumer loop; streams
/// from different topics never share state.
#[derive(Debug, Clone, Default)]
pub struct StatsHistory {
    pub cpu: RangeStat,
    pub net: BTreeMap<String, IfaceHistory>,
}
