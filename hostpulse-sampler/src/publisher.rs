//! Report publisher for the broker session.

use std::sync::Arc;

use zenoh::Session;

use hostpulse_common::{Result, UtilizationReport, report};

/// Publishes utilization reports under a fixed key expression.
#[derive(Clone, Debug)]
pub struct ReportPublisher {
    session: Arc<Session>,
    key: String,
}

impl ReportPublisher {
    pub fn new(session: Arc<Session>, key: impl Into<String>) -> Self {
        Self {
            session,
            key: key.into(),
        }
    }

    /// The full key expression reports are published under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encode and publish one report. Fire-and-forget: failures surface to
    /// the caller and are not retried.
    pub async fn publish(&self, utilization: &UtilizationReport) -> Result<()> {
        let payload = report::encode(utilization)?;
        self.session.put(&self.key, payload).await?;
        Ok(())
    }
}
