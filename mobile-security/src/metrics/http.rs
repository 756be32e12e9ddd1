use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use hyper::client::HttpConnector;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Client, Method, Request};
use hyper_tls::HttpsConnector;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::{MetricsPublisher, MetricsRecord, PublishError};

/// Posts metrics as a JSON document to a metrics service endpoint.
///
/// Both `http` and `https` endpoints are supported. Each publish is a single
/// best-effort request with no retry.
#[derive(Clone)]
pub struct HttpMetricsPublisher {
    client: Client<HttpsConnector<HttpConnector>>,
    url: Url,
    client_id: String,
}

impl HttpMetricsPublisher {
    pub fn new(url: Url, client_id: impl Into<String>) -> Self {
        Self {
            client: Client::builder().build(HttpsConnector::new()),
            url,
            client_id: client_id.into(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsPayload<'a> {
    client_id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    timestamp: i64,
    data: BTreeMap<&'a str, &'a serde_json::Value>,
}

#[async_trait]
impl MetricsPublisher for HttpMetricsPublisher {
    async fn publish(&self, key: &str, records: &[MetricsRecord]) -> Result<(), PublishError> {
        let payload = MetricsPayload {
            client_id: &self.client_id,
            kind: key,
            timestamp: Utc::now().timestamp_millis(),
            data: records
                .iter()
                .map(|record| (record.identifier(), record.data()))
                .collect(),
        };
        let body = serde_json::to_vec(&payload).map_err(PublishError::Serialize)?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(self.url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(PublishError::Request)?;

        debug!(message = "sending metrics", url = %self.url, key);
        let response = self
            .client
            .request(request)
            .await
            .map_err(PublishError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Status(status));
        }

        Ok(())
    }
}
