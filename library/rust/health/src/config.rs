use serde::Deserialize;

use crate::error::HealthError;

/// ElasticConfig は検索クラスタ接続の設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticConfig {
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// CA 証明書（PEM）のパス。未指定ならシステムのルート証明書を使う。
    #[serde(default)]
    pub ca_cert_path: Option<String>,
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

impl ElasticConfig {
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// KafkaConfig は Kafka ブローカー接続の設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct KafkaConfig {
    pub brokers: Vec<String>,
    #[serde(default = "default_security_protocol")]
    pub security_protocol: String,
    #[serde(default)]
    pub sasl_mechanism: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// 指定時はこのトピックのパーティションだけを読む。
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_security_protocol() -> String {
    "PLAINTEXT".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl KafkaConfig {
    /// rdkafka の bootstrap.servers 用にカンマ区切りで返す。
    pub fn bootstrap_servers(&self) -> String {
        self.brokers.join(",")
    }

    pub fn validate(&self) -> Result<(), HealthError> {
        if self.brokers.is_empty() {
            return Err(HealthError::Configuration(
                "no kafka brokers configured".to_string(),
            ));
        }
        if self.brokers.iter().any(String::is_empty) {
            return Err(HealthError::Configuration(
                "empty kafka broker address".to_string(),
            ));
        }
        Ok(())
    }
}
