use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ClusterHealthRecord は `_cat/health?format=json` が返す配列の 1 要素を表す。
///
/// `status` / `cluster` / `epoch` 以外のフィールド（`node.total` 等）も保持するが解釈はしない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterHealthRecord(Map<String, Value>);

impl ClusterHealthRecord {
    /// 文字列値のフィールドを返す。欠落または文字列以外の値は `None`。
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for ClusterHealthRecord
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// ClusterHealthSummary はクラスタ文書から取り出した 3 値。欠落値は既定値で埋まっている。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterHealthSummary {
    pub status: String,
    pub cluster: String,
    pub epoch: String,
}

/// PartitionInfo はブローカーから読めたパーティション 1 件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionInfo {
    pub topic: String,
    pub partition: i32,
}

impl PartitionInfo {
    pub fn new(topic: impl Into<String>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
}

/// ProbeOutcome は依存先 1 つ分の分類結果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy,
    /// 応答はあったが green ではない（クラスタのみ）。
    Degraded(ClusterHealthSummary),
    /// 問い合わせ自体が失敗した。
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// ErrorDetail は HTTP 層へ返すエラー本文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub error_event_id: String,
    pub error_description: String,
}

impl ErrorDetail {
    pub fn new(error_event_id: impl Into<String>, error_description: impl Into<String>) -> Self {
        Self {
            error_event_id: error_event_id.into(),
            error_description: error_description.into(),
        }
    }
}

/// HealthResult は集約後の最終結果。
///
/// `error` が存在するのは `status` が 200 以外のときに限る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthResult {
    status: StatusCode,
    error: Option<ErrorDetail>,
}

impl HealthResult {
    pub fn ok() -> Self {
        Self {
            status: StatusCode::OK,
            error: None,
        }
    }

    pub fn unavailable(request_id: &str, description: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            error: Some(ErrorDetail::new(request_id, description)),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }

    pub fn is_healthy(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn into_parts(self) -> (StatusCode, Option<ErrorDetail>) {
        (self.status, self.error)
    }
}
