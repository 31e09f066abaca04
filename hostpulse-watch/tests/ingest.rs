//! Integration tests for the message-folding side.

use std::collections::BTreeMap;

use hostpulse_watch::aggregator::{RejectReason, ingest};
use hostpulse_watch::history::StatsHistory;
use hostpulse_watch::table::render;

fn msg(cpu: f64, rx: i64, tx: i64) -> Vec<u8> {
    format!(
        r#"{{"cpu": {}, "net": {{"eth0": {{"rx": {}, "tx": {}}}}}}}"#,
        cpu, rx, tx
    )
    .into_bytes()
}

/// A mixed stream of good and bad payloads: the bad ones are rejected
/// without disturbing the summary built from the good ones.
#[test]
fn test_mixed_stream() {
    let mut history = StatsHistory::default();

    assert!(ingest(&msg(0.2, 100, 50), &mut history).is_ok());
    assert_eq!(
        ingest(b"garbage", &mut history),
        Err(RejectReason::Malformed)
    );
    assert!(ingest(&msg(0.9, 900, 10), &mut history).is_ok());
    assert_eq!(
        ingest(br#"{"cpu": 1.0}"#, &mut history),
        Err(RejectReason::MissingField("net"))
    );
    assert!(ingest(&msg(0.5, 300, 30), &mut history).is_ok());

    assert_eq!(history.cpu.current, 0.5);
    assert_eq!(history.cpu.max, 0.9);
    assert_eq!(history.cpu.min, 0.2);

    let eth0 = &history.net["eth0"];
    assert_eq!(eth0.rx.current, 300.0);
    assert_eq!(eth0.rx.max, 900.0);
    assert_eq!(eth0.rx.min, 100.0);
    assert_eq!(eth0.tx.current, 30.0);
    assert_eq!(eth0.tx.max, 50.0);
    assert_eq!(eth0.tx.min, 10.0);
}

/// Each routing key owns its own history; concurrent publishers under
/// different topics never corrupt each other's min/max.
#[test]
fn test_per_routing_key_isolation() {
    let mut histories: BTreeMap<String, StatsHistory> = BTreeMap::new();

    for (key, cpu) in [("pi1", 0.9), ("pi2", 0.1), ("pi1", 0.3)] {
        let history = histories.entry(key.to_string()).or_default();
        ingest(&msg(cpu, 0, 0), history).unwrap();
    }

    assert_eq!(histories["pi1"].cpu.max, 0.9);
    assert_eq!(histories["pi1"].cpu.current, 0.3);
    assert_eq!(histories["pi2"].cpu.max, 0.1);
    assert_eq!(histories["pi2"].cpu.min, 0.1);
}

/// The summary stays renderable after every accepted message.
#[test]
fn test_ingest_then_render() {
    let mut history = StatsHistory::default();
    ingest(&msg(0.25, 1500, 700), &mut history).unwrap();

    let text = render("sensor1", &history);
    assert!(text.contains("sensor1 :"));
    assert!(text.contains("0.25"));
    assert!(text.contains("1500"));
    assert!(text.contains("700"));
}
