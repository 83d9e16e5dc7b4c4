use thiserror::Error;

/// HealthError は依存先プローブの実行失敗を表す。
///
/// Display 文字列はそのままエラー応答の説明に埋め込まれるため、書式を変えないこと。
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("[{status}] elasticsearch client error: {message}")]
    Client { status: u16, message: String },
    #[error("[{status}] elasticsearch health request failed: {body}")]
    Response { status: u16, body: String },
    #[error("could not decode elasticsearch health response: {0}")]
    Decode(String),
    #[error("kafka partition read failed: {0}")]
    PartitionRead(String),
    #[error("{0}")]
    Configuration(String),
}

impl HealthError {
    /// クライアント層（接続・送信）の失敗を HTTP 500 相当として包む。
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            status: 500,
            message: message.into(),
        }
    }
}
