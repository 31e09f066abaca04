//! Host counter source.
//!
//! Raw cumulative counters are read from two procfs files:
//!
//! - `/proc/uptime` - seconds since boot and cumulative idle seconds
//! - `/proc/net/dev` - per-interface receive/transmit byte counters
//!
//! Both are monotonically non-decreasing apart from interface resets and
//! counter wraparound, which the rate layer handles.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use hostpulse_common::{Error, Result};

/// Field position of received bytes on a `/proc/net/dev` interface line.
const NET_DEV_RX_FIELD: usize = 1;
/// Field position of transmitted bytes on a `/proc/net/dev` interface line.
const NET_DEV_TX_FIELD: usize = 9;

/// Cumulative CPU time counters in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuCounters {
    pub uptime: f64,
    pub idle: f64,
}

/// Cumulative byte counters for one network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfaceCounters {
    pub rx: u64,
    pub tx: u64,
}

/// A point-in-time counter snapshot.
///
/// The sampler keeps exactly one previous snapshot to compute deltas
/// against; older snapshots are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub cpu: CpuCounters,
    pub net: BTreeMap<String, IfaceCounters>,
}

/// Reads counter snapshots from a procfs root.
///
/// The root is `/proc` in production and a temporary directory in tests.
#[derive(Debug, Clone)]
pub struct ProcReader {
    root: PathBuf,
}

impl ProcReader {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Take a fresh counter snapshot.
    ///
    /// An unreadable or malformed counter file is fatal for the caller's
    /// current tick; no partial sample is returned.
    pub fn capture(&self) -> Result<RawSample> {
        let cpu = parse_uptime(&self.read("uptime")?)?;
        let net = parse_net_dev(&self.read("net/dev")?)?;
        Ok(RawSample { cpu, net })
    }

    fn read(&self, relative: &str) -> Result<String> {
        let path = self.root.join(relative);
        fs::read_to_string(&path).map_err(|source| Error::CounterSource {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Default for ProcReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `/proc/uptime`: two whitespace-separated floats, uptime then idle.
pub fn parse_uptime(text: &str) -> Result<CpuCounters> {
    let mut fields = text.split_whitespace();

    let uptime = parse_float_field(fields.next(), "uptime")?;
    let idle = parse_float_field(fields.next(), "idle")?;

    Ok(CpuCounters { uptime, idle })
}

fn parse_float_field(field: Option<&str>, name: &str) -> Result<f64> {
    let raw = field
        .ok_or_else(|| Error::CounterFormat(format!("uptime: missing '{}' field", name)))?;
    raw.parse::<f64>()
        .map_err(|_| Error::CounterFormat(format!("uptime: invalid '{}' value '{}'", name, raw)))
}

/// Parse `/proc/net/dev`.
///
/// Every line containing a `:` names an interface; the 2nd whitespace
/// field is cumulative received bytes and the 10th is transmitted bytes.
/// The trailing `:` on the interface name is stripped.
pub fn parse_net_dev(text: &str) -> Result<BTreeMap<String, IfaceCounters>> {
    let mut result = BTreeMap::new();

    for line in text.lines() {
        if !line.contains(':') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= NET_DEV_TX_FIELD {
            return Err(Error::CounterFormat(format!(
                "net/dev: truncated interface line '{}'",
                line.trim()
            )));
        }

        let name = fields[0].trim_end_matches(':').to_string();
        let rx = parse_byte_field(fields[NET_DEV_RX_FIELD], &name, "rx")?;
        let tx = parse_byte_field(fields[NET_DEV_TX_FIELD], &name, "tx")?;

        result.insert(name, IfaceCounters { rx, tx });
    }

    Ok(result)
}

fn parse_byte_field(raw: &str, iface: &str, name: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|_| {
        Error::CounterFormat(format!(
            "net/dev: invalid '{}' counter '{}' for interface '{}'",
            name, raw, iface
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo:  444555     100    0    0    0     0          0         0   444555     100    0    0    0     0       0          0
  eth0: 1000000    2000    0    0    0     0          0         0   500000    1500    0    0    0     0       0          0
";

    #[test]
    fn test_parse_uptime() {
        let cpu = parse_uptime("100.25 90.50\n").unwrap();
        assert_eq!(cpu.uptime, 100.25);
        assert_eq!(cpu.idle, 90.50);
    }

    #[test]
    fn test_parse_uptime_rejects_garbage() {
        assert!(parse_uptime("").is_err());
        assert!(parse_uptime("100.25").is_err());
        assert!(parse_uptime("up idle").is_err());
    }

    #[test]
    fn test_parse_net_dev() {
        let net = parse_net_dev(NET_DEV).unwrap();
        assert_eq!(net.len(), 2);

        let eth0 = &net["eth0"];
        assert_eq!(eth0.rx, 1_000_000);
        assert_eq!(eth0.tx, 500_000);

        let lo = &net["lo"];
        assert_eq!(lo.rx, 444_555);
        assert_eq!(lo.tx, 444_555);
    }

    #[test]
    fn test_parse_net_dev_strips_trailing_colon() {
        let net = parse_net_dev(NET_DEV).unwrap();
        assert!(net.contains_key("eth0"));
        assert!(!net.contains_key("eth0:"));
    }

    #[test]
    fn test_parse_net_dev_skips_headers() {
        // The two banner lines carry no ':' and must not become interfaces.
        let net = parse_net_dev(NET_DEV).unwrap();
        assert!(!net.keys().any(|k| k.contains("Inter-")));
    }

    #[test]
    fn test_parse_net_dev_truncated_line() {
        let err = parse_net_dev("eth0: 100 200\n").unwrap_err();
        assert!(matches!(err, Error::CounterFormat(_)));
    }

    #[test]
    fn test_capture_from_fake_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("uptime"), "100.0 90.0\n").unwrap();
        std::fs::create_dir(root.path().join("net")).unwrap();
        std::fs::write(root.path().join("net/dev"), NET_DEV).unwrap();

        let sample = ProcReader::with_root(root.path()).capture().unwrap();
        assert_eq!(sample.cpu.uptime, 100.0);
        assert_eq!(sample.net["eth0"].rx, 1_000_000);
    }

    #[test]
    fn test_capture_unreadable_source() {
        let root = tempfile::tempdir().unwrap();
        // No files at all: the first read fails with a source error.
        let err = ProcReader::with_root(root.path()).capture().unwrap_err();
        assert!(matches!(err, Error::CounterSource { .. }));
    }
}
