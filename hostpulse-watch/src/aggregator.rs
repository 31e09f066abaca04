//! Folds inbound report payloads into a [`StatsHistory`].

use thiserror::Error;
use tracing::warn;

use hostpulse_common::report::decode_wire;

use crate::history::StatsHistory;

/// Why an inbound message was not folded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("message could not be parsed")]
    Malformed,

    #[error("missing '{0}' field")]
    MissingField(&'static str),
}

/// Fold one payload into the history for its routing key.
///
/// Validation happens before any mutation: an undecodable payload or a
/// missing top-level `cpu`/`net` field rejects the whole message with the
/// history untouched. A per-interface entry lacking `rx` or `tx` skips
/// just that interface; `cpu` and the remaining interfaces still fold.
pub fn ingest(payload: &[u8], history: &mut StatsHistory) -> Result<(), RejectReason> {
    let report = decode_wire(payload).map_err(|_| RejectReason::Malformed)?;

    let Some(cpu) = report.cpu else {
        return Err(RejectReason::MissingField("cpu"));
    };
    let Some(net) = report.net else {
        return Err(RejectReason::MissingField("net"));
    };

    history.cpu.observe(cpu);

    for (iface, rate) in net {
        let entry = history.net.entry(iface.clone()).or_default();

        let Some(rx) = rate.rx else {
            warn!(iface = %iface, "Ignoring interface: no 'rx' field");
            continue;
        };
        let Some(tx) = rate.tx else {
            warn!(iface = %iface, "Ignoring interface: no 'tx' field");
            continue;
        };

        entry.rx.observe(rx as f64);
        entry.tx.observe(tx as f64);
    }

    Ok(())
}
