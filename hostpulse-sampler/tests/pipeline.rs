//! Integration tests for the capture-to-report pipeline.

use hostpulse_common::report::{decode_wire, encode};
use hostpulse_sampler::proc::ProcReader;
use hostpulse_sampler::rates::compute_report;

const NET_DEV_T0: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
  eth0:    1000      10    0    0    0     0          0         0      500       5    0    0    0     0       0          0
";

const NET_DEV_T1: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
  eth0:    1500      15    0    0    0     0          0         0      600       6    0    0    0     0       0          0
";

/// Reference scenario: uptime 100 -> 101, idle 90 -> 90.5 over one
/// second gives cpu 0.5; eth0 1000 -> 1500 rx and 500 -> 600 tx give
/// rates 500 and 100.
#[test]
fn test_capture_compute_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("net")).unwrap();
    let reader = ProcReader::with_root(root.path());

    std::fs::write(root.path().join("uptime"), "100.0 90.0\n").unwrap();
    std::fs::write(root.path().join("net/dev"), NET_DEV_T0).unwrap();
    let first = reader.capture().unwrap();

    std::fs::write(root.path().join("uptime"), "101.0 90.5\n").unwrap();
    std::fs::write(root.path().join("net/dev"), NET_DEV_T1).unwrap();
    let second = reader.capture().unwrap();

    let report = compute_report(&first, &second, 1.0).unwrap();

    assert_eq!(report.cpu, 0.5);
    assert_eq!(report.net["eth0"].rx, 500);
    assert_eq!(report.net["eth0"].tx, 100);
}

/// The published payload must be decodable by the watcher's lenient view.
#[test]
fn test_report_round_trips_over_the_wire() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("net")).unwrap();
    let reader = ProcReader::with_root(root.path());

    std::fs::write(root.path().join("uptime"), "100.0 90.0\n").unwrap();
    std::fs::write(root.path().join("net/dev"), NET_DEV_T0).unwrap();
    let first = reader.capture().unwrap();

    std::fs::write(root.path().join("uptime"), "102.0 91.0\n").unwrap();
    std::fs::write(root.path().join("net/dev"), NET_DEV_T1).unwrap();
    let second = reader.capture().unwrap();

    let report = compute_report(&first, &second, 2.0).unwrap();
    let payload = encode(&report).unwrap();

    let wire = decode_wire(&payload).unwrap();
    assert_eq!(wire.cpu, Some(0.5));

    let net = wire.net.unwrap();
    assert_eq!(net["eth0"].rx, Some(250));
    assert_eq!(net["eth0"].tx, Some(50));
}

/// Two captures of an unchanged uptime counter must surface as an error,
/// never as NaN or infinity in a report.
#[test]
fn test_same_tick_capture_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("net")).unwrap();
    let reader = ProcReader::with_root(root.path());

    std::fs::write(root.path().join("uptime"), "100.0 90.0\n").unwrap();
    std::fs::write(root.path().join("net/dev"), NET_DEV_T0).unwrap();

    let first = reader.capture().unwrap();
    let second = reader.capture().unwrap();

    assert!(compute_report(&first, &second, 1.0).is_err());
}
