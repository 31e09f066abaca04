//! Utilization sampler binary.
//!
//! Samples host CPU and network counters once per second and publishes
//! rate metrics to the broker under a single topic.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use hostpulse_common::{BrokerConfig, Credentials, connect, init_tracing, shutdown_signal};
use hostpulse_common::keyexpr::utilization_key;

use hostpulse_sampler::proc::ProcReader;
use hostpulse_sampler::publisher::ReportPublisher;
use hostpulse_sampler::sampler::{SAMPLE_INTERVAL, run_sampler};

#[derive(Parser, Debug)]
#[command(name = "hostpulse-sampler", about = "Publish host utilization metrics to a broker topic")]
struct SamplerArgs {
    /// Message broker to connect to (host, host:port, or full endpoint).
    #[arg(short = 'b', value_name = "BROKER")]
    broker: String,

    /// Virtual host.
    #[arg(short = 'p', value_name = "VHOST", default_value = "/")]
    vhost: String,

    /// Login credentials as user:password.
    #[arg(short = 'c', value_name = "USER:PASS")]
    credentials: Option<Credentials>,

    /// Topic (routing key) to publish under.
    #[arg(short = 'k', value_name = "TOPIC")]
    topic: String,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SamplerArgs::parse();

    init_tracing(&args.log_level).map_err(|e| anyhow::anyhow!("{}", e))?;

    let broker = BrokerConfig {
        host: args.broker,
        vhost: args.vhost,
        credentials: args.credentials,
    };

    let session = Arc::new(connect(&broker).await.map_err(|e| anyhow::anyhow!("{}", e))?);

    let key = utilization_key(&broker.vhost, &args.topic);
    let publisher = ReportPublisher::new(session.clone(), key);

    tracing::info!(
        key = %publisher.key(),
        interval_secs = SAMPLE_INTERVAL.as_secs(),
        "Sampler running. Press Ctrl+C to stop."
    );

    let result = run_sampler(
        ProcReader::new(),
        publisher,
        SAMPLE_INTERVAL,
        shutdown_signal(),
    )
    .await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Sampler stopped on fatal error");
    }

    // The session closes on every exit path, including the fatal one.
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Error closing broker session");
    }

    tracing::info!("Goodbye!");

    result.map_err(|e| anyhow::anyhow!("{}", e))
}
