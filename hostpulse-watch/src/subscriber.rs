//! Topic subscriptions feeding a single consumer channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use zenoh::Session;

use hostpulse_common::Result;
use hostpulse_common::keyexpr::utilization_key;

/// One inbound message, tagged with the topic it arrived under.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub routing_key: String,
    pub payload: Vec<u8>,
}

const CHANNEL_CAPACITY: usize = 64;

/// Declare one subscriber per topic and forward every sample into a single
/// channel, so the consumer folds messages one at a time regardless of how
/// many topics are watched.
///
/// A subscriber declaration failure is fatal; a later receive error ends
/// only that topic's stream. The channel closes once every stream has
/// ended.
pub async fn subscribe_topics(
    session: &Arc<Session>,
    vhost: &str,
    topics: &[String],
) -> Result<(mpsc::Receiver<Delivery>, Vec<JoinHandle<()>>)> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let mut tasks = Vec::with_capacity(topics.len());

    for topic in topics {
        let key = utilization_key(vhost, topic);
        let subscriber = session.declare_subscriber(&key).await?;
        tracing::info!(key = %key, topic = %topic, "Subscribed");

        let tx = tx.clone();
        let topic = topic.clone();
        tasks.push(tokio::spawn(async move {
            loop {
                match subscriber.recv_async().await {
                    Ok(sample) => {
                        let delivery = Delivery {
                            routing_key: topic.clone(),
                            payload: sample.payload().to_bytes().to_vec(),
                        };
                        if tx.send(delivery).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::error!(topic = %topic, error = %e, "Subscriber stream ended");
                        return;
                    }
                }
            }
        }));
    }

    Ok((rx, tasks))
}
