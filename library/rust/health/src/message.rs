//! エラー説明文の組み立て。

use crate::response::ClusterHealthSummary;

pub const SERVICE_UNAVAILABLE_PREFIX: &str = "HRI Service Temporarily Unavailable | error Detail: ";
pub const KAFKA_FAILURE: &str = "Kafka Connection/Read Partition failed";

pub fn kafka_clause() -> String {
    format!("Kafka status: {KAFKA_FAILURE}")
}

/// クラスタ節とブローカー節を連結する。接頭辞は先頭に 1 回だけ付く。
///
/// どちらの節も無ければ `None`。
pub fn compose(cluster: Option<&ClusterHealthSummary>, kafka_failed: bool) -> Option<String> {
    let clauses: Vec<String> = cluster
        .map(ClusterHealthSummary::clause)
        .into_iter()
        .chain(kafka_failed.then(kafka_clause))
        .collect();

    if clauses.is_empty() {
        return None;
    }
    Some(format!("{SERVICE_UNAVAILABLE_PREFIX}{}", clauses.join("| ")))
}

pub fn cluster_unreachable(cause: &str) -> String {
    format!("Could not perform elasticsearch health check: {cause}")
}
