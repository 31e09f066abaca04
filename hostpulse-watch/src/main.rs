//! Utilization watcher binary.
//!
//! Subscribes to one or more utilization topics and prints an updated
//! current/min/max summary after every accepted message.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use hostpulse_common::{BrokerConfig, Credentials, connect, init_tracing, shutdown_signal};

use hostpulse_watch::aggregator::ingest;
use hostpulse_watch::history::StatsHistory;
use hostpulse_watch::subscriber::subscribe_topics;
use hostpulse_watch::table::render;

#[derive(Parser, Debug)]
#[command(name = "hostpulse-watch", about = "Watch utilization topics and summarize min/max/current")]
struct WatchArgs {
    /// Message broker to connect to (host, host:port, or full endpoint).
    #[arg(short = 'b', value_name = "BROKER")]
    broker: String,

    /// Virtual host.
    #[arg(short = 'p', value_name = "VHOST", default_value = "/")]
    vhost: String,

    /// Login credentials as user:password.
    #[arg(short = 'c', value_name = "USER:PASS")]
    credentials: Option<Credentials>,

    /// Topics (routing keys) to subscribe to.
    #[arg(short = 'k', value_name = "TOPIC", num_args = 1.., required = true)]
    topics: Vec<String>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = WatchArgs::parse();

    init_tracing(&args.log_level).map_err(|e| anyhow::anyhow!("{}", e))?;

    let broker = BrokerConfig {
        host: args.broker,
        vhost: args.vhost,
        credentials: args.credentials,
    };

    let session = Arc::new(connect(&broker).await.map_err(|e| anyhow::anyhow!("{}", e))?);

    let (mut deliveries, tasks) = subscribe_topics(&session, &broker.vhost, &args.topics)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!(
        topics = ?args.topics,
        "Watcher running. Press Ctrl+C to stop."
    );

    // One summary per routing key; messages from different topics never
    // share min/max state.
    let mut histories: BTreeMap<String, StatsHistory> = BTreeMap::new();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Received shutdown signal");
                break;
            }
            delivery = deliveries.recv() => {
                let Some(delivery) = delivery else {
                    tracing::warn!("All subscriber streams ended");
                    break;
                };

                let history = histories.entry(delivery.routing_key.clone()).or_default();
                match ingest(&delivery.payload, history) {
                    Ok(()) => print!("{}", render(&delivery.routing_key, history)),
                    Err(reason) => {
                        tracing::warn!(
                            routing_key = %delivery.routing_key,
                            reason = %reason,
                            "Discarding message"
                        );
                    }
                }
            }
        }
    }

    for task in &tasks {
        task.abort();
    }

    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Error closing broker session");
    }

    tracing::info!("Goodbye!");

    Ok(())
}
