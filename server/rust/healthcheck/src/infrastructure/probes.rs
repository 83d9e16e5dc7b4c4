use std::sync::Arc;

use hri_health::{
    ClusterHealthQuery, ElasticConfig, HealthError, KafkaConfig, KafkaPartitionReader,
    OpenSearchClusterHealth, PartitionReader,
};

/// ProbeFactory はリクエストごとに依存先クライアントを組み立てる。
///
/// ハンドラのテストではここを差し替えて実クライアントを使わずに済ませる。
pub trait ProbeFactory: Send + Sync {
    fn cluster_health_query(&self) -> Result<Arc<dyn ClusterHealthQuery>, HealthError>;
    fn partition_reader(&self) -> Result<Arc<dyn PartitionReader>, HealthError>;
}

/// ConfiguredProbeFactory は設定ファイルの内容から OpenSearch / Kafka クライアントを作る。
pub struct ConfiguredProbeFactory {
    elastic: ElasticConfig,
    kafka: KafkaConfig,
}

impl ConfiguredProbeFactory {
    pub fn new(elastic: ElasticConfig, kafka: KafkaConfig) -> Self {
        Self { elastic, kafka }
    }
}

impl ProbeFactory for ConfiguredProbeFactory {
    fn cluster_health_query(&self) -> Result<Arc<dyn ClusterHealthQuery>, HealthError> {
        Ok(Arc::new(OpenSearchClusterHealth::from_config(&self.elastic)?))
    }

    fn partition_reader(&self) -> Result<Arc<dyn PartitionReader>, HealthError> {
        Ok(Arc::new(KafkaPartitionReader::from_config(&self.kafka)?))
    }
}
