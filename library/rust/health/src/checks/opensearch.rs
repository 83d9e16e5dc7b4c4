use async_trait::async_trait;
use opensearch::auth::Credentials;
use opensearch::cert::{Certificate, CertificateValidation};
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::http::Url;
use opensearch::OpenSearch;

use crate::checker::ClusterHealthQuery;
use crate::config::ElasticConfig;
use crate::error::HealthError;
use crate::response::ClusterHealthRecord;

/// OpenSearchClusterHealth は `GET /_cat/health?format=json` で ClusterHealthQuery を実装する。
///
/// Elasticsearch 7 系とも同じエンドポイントで互換がある。
pub struct OpenSearchClusterHealth {
    client: OpenSearch,
}

impl OpenSearchClusterHealth {
    pub fn new(client: OpenSearch) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ElasticConfig) -> Result<Self, HealthError> {
        let url = Url::parse(config.url.trim_end_matches('/')).map_err(|e| {
            HealthError::Configuration(format!("cannot create client: cannot parse url: {e}"))
        })?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let mut builder =
            TransportBuilder::new(conn_pool).cert_validation(cert_validation(config)?);

        if config.has_credentials() {
            builder = builder.auth(Credentials::Basic(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let transport = builder
            .build()
            .map_err(|e| HealthError::Configuration(format!("cannot create client: {e}")))?;

        Ok(Self::new(OpenSearch::new(transport)))
    }
}

fn cert_validation(config: &ElasticConfig) -> Result<CertificateValidation, HealthError> {
    if config.insecure_skip_verify {
        return Ok(CertificateValidation::None);
    }
    let Some(path) = &config.ca_cert_path else {
        return Ok(CertificateValidation::Default);
    };

    let pem = std::fs::read(path).map_err(|e| {
        HealthError::Configuration(format!("cannot read elastic certificate {path}: {e}"))
    })?;
    let cert = Certificate::from_pem(&pem).map_err(|e| {
        HealthError::Configuration(format!("cannot parse elastic certificate {path}: {e}"))
    })?;
    Ok(CertificateValidation::Full(cert))
}

#[async_trait]
impl ClusterHealthQuery for OpenSearchClusterHealth {
    async fn cluster_health(&self) -> Result<Vec<ClusterHealthRecord>, HealthError> {
        let response = self
            .client
            .cat()
            .health()
            .format("json")
            .send()
            .await
            .map_err(|e| HealthError::client(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HealthError::Response {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<ClusterHealthRecord>>()
            .await
            .map_err(|e| HealthError::Decode(e.to_string()))
    }
}
