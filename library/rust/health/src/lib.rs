//! hri-health: 検索クラスタと Kafka の 2 依存先をまとめて判定するヘルスプローブ。
//!
//! 各依存先を 1 回ずつ問い合わせ、HTTP ステータスと任意のエラー詳細の組に畳み込む。
//! 具体的なクライアント実装は `opensearch` / `kafka` feature で有効化する。

pub mod checker;
pub mod checks;
pub mod cluster;
pub mod config;
pub mod error;
pub mod message;
pub mod response;

pub use checker::{evaluate, ClusterHealthQuery, HealthAggregator, PartitionReader};
pub use config::{ElasticConfig, KafkaConfig};
pub use error::HealthError;
pub use response::{
    ClusterHealthRecord, ClusterHealthSummary, ErrorDetail, HealthResult, PartitionInfo,
    ProbeOutcome,
};

#[cfg(feature = "opensearch")]
pub use checks::opensearch::OpenSearchClusterHealth;

#[cfg(feature = "kafka")]
pub use checks::kafka::KafkaPartitionReader;

#[cfg(feature = "mock")]
pub use checker::{MockClusterHealthQuery, MockPartitionReader};
