use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer};
use tracing::debug;

use crate::checker::PartitionReader;
use crate::config::KafkaConfig;
use crate::error::HealthError;
use crate::response::PartitionInfo;

/// KafkaPartitionReader はブローカーのメタデータを取得して PartitionReader を実装する。
///
/// `close` は既定の no-op のまま。接続は `BaseConsumer` のドロップ時に解放される。
pub struct KafkaPartitionReader {
    consumer: Arc<BaseConsumer>,
    topic: Option<String>,
    timeout: Duration,
}

impl KafkaPartitionReader {
    pub fn from_config(config: &KafkaConfig) -> Result<Self, HealthError> {
        config.validate()?;

        let consumer: BaseConsumer = client_config(config).create().map_err(|e| {
            HealthError::Configuration(format!("Kafka client creation failed: {e}"))
        })?;

        Ok(Self {
            consumer: Arc::new(consumer),
            topic: config.topic.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }
}

fn client_config(config: &KafkaConfig) -> ClientConfig {
    let mut client_config = ClientConfig::new();
    client_config
        .set("bootstrap.servers", config.bootstrap_servers())
        .set("security.protocol", &config.security_protocol)
        .set("socket.timeout.ms", config.timeout_ms.to_string());

    if let Some(mechanism) = &config.sasl_mechanism {
        client_config.set("sasl.mechanism", mechanism);
    }
    if let Some(username) = &config.username {
        client_config.set("sasl.username", username);
    }
    if let Some(password) = &config.password {
        client_config.set("sasl.password", password);
    }
    client_config
}

#[async_trait]
impl PartitionReader for KafkaPartitionReader {
    async fn read_partitions(&self) -> Result<Vec<PartitionInfo>, HealthError> {
        let consumer = Arc::clone(&self.consumer);
        let topic = self.topic.clone();
        let timeout = self.timeout;

        // fetch_metadata はブロッキングするため spawn_blocking で実行する
        tokio::task::spawn_blocking(move || {
            let metadata = consumer
                .fetch_metadata(topic.as_deref(), timeout)
                .map_err(|e| {
                    HealthError::PartitionRead(format!("Kafka broker unreachable: {e}"))
                })?;

            let mut partitions = Vec::new();
            for t in metadata.topics() {
                if let Some(err) = t.error() {
                    return Err(HealthError::PartitionRead(format!(
                        "topic {} metadata error: {err:?}",
                        t.name()
                    )));
                }
                partitions.extend(
                    t.partitions()
                        .iter()
                        .map(|p| PartitionInfo::new(t.name(), p.id())),
                );
            }
            debug!(count = partitions.len(), "read kafka partitions");
            Ok(partitions)
        })
        .await
        .map_err(|e| HealthError::PartitionRead(format!("Task join error: {e}")))?
    }
}
