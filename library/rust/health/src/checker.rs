use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::cluster;
use crate::error::HealthError;
use crate::message::{self, KAFKA_FAILURE};
use crate::response::{ClusterHealthRecord, HealthResult, PartitionInfo, ProbeOutcome};

/// ClusterHealthQuery は検索クラスタのヘルス問い合わせ（`_cat/health`）を表す。
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ClusterHealthQuery: Send + Sync {
    async fn cluster_health(&self) -> Result<Vec<ClusterHealthRecord>, HealthError>;
}

/// PartitionReader はブローカーのパーティションメタデータ読み出しを表す。
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PartitionReader: Send + Sync {
    async fn read_partitions(&self) -> Result<Vec<PartitionInfo>, HealthError>;

    /// 接続を解放する。既定では何もしない。
    ///
    /// 実装がドロップ時に接続を解放する場合（rdkafka の `BaseConsumer` 等）は上書き不要。
    /// 呼び出し側は読み出しの成否にかかわらず 1 回呼ぶ。
    async fn close(&self) {}
}

/// HealthAggregator は 2 つの依存先を 1 回ずつ問い合わせ、1 つの結果に畳み込む。
///
/// 状態は持たないため、複数リクエストから同時に呼び出してよい。
pub struct HealthAggregator {
    cluster: Arc<dyn ClusterHealthQuery>,
    partitions: Arc<dyn PartitionReader>,
}

impl HealthAggregator {
    pub fn new(
        cluster: Arc<dyn ClusterHealthQuery>,
        partitions: Arc<dyn PartitionReader>,
    ) -> Self {
        Self {
            cluster,
            partitions,
        }
    }

    pub async fn evaluate(&self, request_id: &str) -> HealthResult {
        evaluate(request_id, self.cluster.as_ref(), self.partitions.as_ref()).await
    }
}

/// クラスタ → ブローカーの順に問い合わせる。クラスタ問い合わせ自体が失敗した場合は
/// ブローカーを問い合わせずに終了する。
pub async fn evaluate(
    request_id: &str,
    cluster: &dyn ClusterHealthQuery,
    partitions: &dyn PartitionReader,
) -> HealthResult {
    debug!(request_id, "starting health check");

    let records = match cluster.cluster_health().await {
        Ok(records) => records,
        Err(e) => {
            error!(request_id, error = %e, "elasticsearch health check could not be performed");
            return HealthResult::unavailable(
                request_id,
                message::cluster_unreachable(&e.to_string()),
            );
        }
    };
    let cluster_outcome = classify_cluster(&records);

    let read = partitions.read_partitions().await;
    if let Err(e) = &read {
        // 応答には固定文言しか載せないので、原因はここで残す。
        warn!(request_id, error = %e, "kafka partition read failed");
    }
    let kafka_outcome = classify_partitions(&read);

    let result = fold(request_id, &cluster_outcome, &kafka_outcome);
    if let Some(detail) = result.error() {
        warn!(
            request_id,
            status = result.status().as_u16(),
            description = %detail.error_description,
            "health check reported unavailable"
        );
    }
    result
}

/// status が `green` のときだけ Healthy。それ以外（未知の値・欠落を含む）は Degraded。
pub fn classify_cluster(records: &[ClusterHealthRecord]) -> ProbeOutcome {
    let summary = cluster::summarize(records);
    if summary.is_green() {
        ProbeOutcome::Healthy
    } else {
        ProbeOutcome::Degraded(summary)
    }
}

/// 読み出しの成否だけを見る。失敗時の原因は固定文言に置き換える。
pub fn classify_partitions(result: &Result<Vec<PartitionInfo>, HealthError>) -> ProbeOutcome {
    match result {
        Ok(_) => ProbeOutcome::Healthy,
        Err(_) => ProbeOutcome::Unreachable(KAFKA_FAILURE.to_string()),
    }
}

fn fold(request_id: &str, cluster: &ProbeOutcome, kafka: &ProbeOutcome) -> HealthResult {
    let degraded = match cluster {
        ProbeOutcome::Healthy => None,
        ProbeOutcome::Degraded(summary) => Some(summary),
        ProbeOutcome::Unreachable(cause) => {
            return HealthResult::unavailable(request_id, message::cluster_unreachable(cause));
        }
    };

    match message::compose(degraded, !kafka.is_healthy()) {
        Some(description) => HealthResult::unavailable(request_id, description),
        None => HealthResult::ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    const REQUEST_ID: &str = "testRequestId";

    fn record(pairs: &[(&str, &str)]) -> ClusterHealthRecord {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn cluster_returning(records: Vec<ClusterHealthRecord>) -> MockClusterHealthQuery {
        let mut mock = MockClusterHealthQuery::new();
        mock.expect_cluster_health()
            .times(1)
            .returning(move || Ok(records.clone()));
        mock
    }

    fn kafka_ok() -> MockPartitionReader {
        let mut mock = MockPartitionReader::new();
        mock.expect_read_partitions()
            .times(1)
            .returning(|| {
                Ok(vec![
                    PartitionInfo::new("ingest", 0),
                    PartitionInfo::new("ingest", 1),
                ])
            });
        mock
    }

    fn kafka_err() -> MockPartitionReader {
        let mut mock = MockPartitionReader::new();
        mock.expect_read_partitions().times(1).returning(|| {
            Err(HealthError::PartitionRead(
                "ResponseError contacting Kafka cluster: could not read partitions".to_string(),
            ))
        });
        mock
    }

    #[tokio::test]
    async fn test_all_healthy() {
        let cluster = cluster_returning(vec![record(&[("status", "green")])]);
        let result = evaluate(REQUEST_ID, &cluster, &kafka_ok()).await;
        assert_eq!(result, HealthResult::ok());
    }

    #[tokio::test]
    async fn test_cluster_degraded() {
        let cluster = cluster_returning(vec![record(&[
            ("status", "yellow"),
            ("cluster", "abc"),
            ("epoch", "100"),
        ])]);
        let result = evaluate(REQUEST_ID, &cluster, &kafka_ok()).await;
        assert_eq!(result.status(), StatusCode::SERVICE_UNAVAILABLE);
        let detail = result.error().unwrap();
        assert_eq!(detail.error_event_id, REQUEST_ID);
        assert_eq!(
            detail.error_description,
            "HRI Service Temporarily Unavailable | error Detail: ElasticSearch status: yellow, clusterId: abc, unixTimestamp: 100"
        );
    }

    #[tokio::test]
    async fn test_empty_document_is_degraded_with_defaults() {
        let cluster = cluster_returning(vec![]);
        let result = evaluate(REQUEST_ID, &cluster, &kafka_ok()).await;
        assert_eq!(
            result.error().unwrap().error_description,
            "HRI Service Temporarily Unavailable | error Detail: ElasticSearch status: NONE/NotReported, clusterId: NotReported, unixTimestamp: NotReported"
        );
    }

    #[tokio::test]
    async fn test_kafka_failure_only() {
        let cluster = cluster_returning(vec![record(&[("status", "green")])]);
        let result = evaluate(REQUEST_ID, &cluster, &kafka_err()).await;
        assert_eq!(result.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            result.error().unwrap().error_description,
            "HRI Service Temporarily Unavailable | error Detail: Kafka status: Kafka Connection/Read Partition failed"
        );
    }

    #[tokio::test]
    async fn test_cluster_degraded_and_kafka_failure() {
        let cluster = cluster_returning(vec![record(&[
            ("status", "red"),
            ("cluster", "abc"),
            ("epoch", "100"),
        ])]);
        let result = evaluate(REQUEST_ID, &cluster, &kafka_err()).await;
        assert_eq!(
            result.error().unwrap().error_description,
            "HRI Service Temporarily Unavailable | error Detail: ElasticSearch status: red, clusterId: abc, unixTimestamp: 100| Kafka status: Kafka Connection/Read Partition failed"
        );
    }

    #[tokio::test]
    async fn test_cluster_unreachable_skips_kafka() {
        let mut cluster = MockClusterHealthQuery::new();
        cluster
            .expect_cluster_health()
            .times(1)
            .returning(|| Err(HealthError::client("client error")));
        let mut kafka = MockPartitionReader::new();
        kafka.expect_read_partitions().times(0);

        let result = evaluate(REQUEST_ID, &cluster, &kafka).await;
        assert_eq!(result.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            result.error().unwrap().error_description,
            "Could not perform elasticsearch health check: [500] elasticsearch client error: client error"
        );
    }

    #[tokio::test]
    async fn test_aggregator_wraps_evaluate() {
        let aggregator = HealthAggregator::new(
            Arc::new(cluster_returning(vec![record(&[("status", "green")])])),
            Arc::new(kafka_ok()),
        );
        assert!(aggregator.evaluate(REQUEST_ID).await.is_healthy());
    }

    #[test]
    fn test_classify_cluster() {
        assert_eq!(
            classify_cluster(&[record(&[("status", "green")])]),
            ProbeOutcome::Healthy
        );
        assert!(matches!(
            classify_cluster(&[record(&[("status", "purple")])]),
            ProbeOutcome::Degraded(s) if s.status == "purple"
        ));
    }

    #[test]
    fn test_classify_partitions_hides_cause() {
        let outcome = classify_partitions(&Err(HealthError::PartitionRead("boom".to_string())));
        assert_eq!(
            outcome,
            ProbeOutcome::Unreachable("Kafka Connection/Read Partition failed".to_string())
        );
        assert_eq!(classify_partitions(&Ok(vec![])), ProbeOutcome::Healthy);
    }

    #[test]
    fn test_fold_cluster_unreachable_ignores_kafka() {
        let result = fold(
            REQUEST_ID,
            &ProbeOutcome::Unreachable("timeout".to_string()),
            &ProbeOutcome::Unreachable(KAFKA_FAILURE.to_string()),
        );
        assert_eq!(
            result.error().unwrap().error_description,
            "Could not perform elasticsearch health check: timeout"
        );
    }
}
