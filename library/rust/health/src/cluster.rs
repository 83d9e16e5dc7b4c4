//! クラスタヘルス文書からのフィールド抽出。
//!
//! 問い合わせ処理とは切り離し、既定値の補完規則だけを単体で検証できるようにしている。

use crate::response::{ClusterHealthRecord, ClusterHealthSummary};

pub const DEFAULT_STATUS: &str = "NONE/NotReported";
pub const DEFAULT_FIELD: &str = "NotReported";

const HEALTHY_STATUS: &str = "green";

/// 先頭レコードだけを参照して要約する。空配列なら全フィールドが既定値になる。
pub fn summarize(records: &[ClusterHealthRecord]) -> ClusterHealthSummary {
    extract(records.first())
}

/// レコードから status / cluster / epoch を取り出し、欠落したものだけ既定値で補う。
pub fn extract(record: Option<&ClusterHealthRecord>) -> ClusterHealthSummary {
    let field = |name: &str, default: &str| {
        record
            .and_then(|r| r.field(name))
            .unwrap_or(default)
            .to_string()
    };

    ClusterHealthSummary {
        status: field("status", DEFAULT_STATUS),
        cluster: field("cluster", DEFAULT_FIELD),
        epoch: field("epoch", DEFAULT_FIELD),
    }
}

impl ClusterHealthSummary {
    pub fn is_green(&self) -> bool {
        self.status == HEALTHY_STATUS
    }

    pub fn clause(&self) -> String {
        format!(
            "ElasticSearch status: {}, clusterId: {}, unixTimestamp: {}",
            self.status, self.cluster, self.epoch
        )
    }
}
