mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::SecurityCheckResult;

pub use self::http::HttpMetricsPublisher;

pub const SECURITY_METRICS_IDENTIFIER: &str = "security";

/// Sink for metrics records, usually a remote metrics service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsPublisher: Send + Sync {
    async fn publish(&self, key: &str, records: &[MetricsRecord]) -> Result<(), PublishError>;
}

/// A named block of metrics data, keyed by `identifier` in the published document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    identifier: String,
    data: serde_json::Value,
}

impl MetricsRecord {
    pub fn new(identifier: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            identifier: identifier.into(),
            data,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityCheckResultMetric {
    id: String,
    name: String,
    passed: bool,
}

impl SecurityCheckResultMetric {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passed(&self) -> bool {
        self.passed
    }
}

impl From<&SecurityCheckResult> for SecurityCheckResultMetric {
    fn from(result: &SecurityCheckResult) -> Self {
        Self {
            id: result.name().split_whitespace().collect(),
            name: result.name().to_owned(),
            passed: result.passed(),
        }
    }
}

/// Converts an ordered set of check results into security metrics.
#[derive(Debug, Clone)]
pub struct CheckResultMetrics {
    results: Vec<SecurityCheckResult>,
}

impl CheckResultMetrics {
    pub fn new(results: Vec<SecurityCheckResult>) -> Self {
        Self { results }
    }

    pub fn identifier(&self) -> &'static str {
        SECURITY_METRICS_IDENTIFIER
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// One metric per result, in result order.
    pub fn collect(&self) -> Vec<SecurityCheckResultMetric> {
        self.results.iter().map(Into::into).collect()
    }

    pub fn record(&self) -> Result<MetricsRecord, PublishError> {
        let data = serde_json::to_value(self.collect()).map_err(PublishError::Serialize)?;
        Ok(MetricsRecord::new(self.identifier(), data))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to serialize metrics")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to build metrics request")]
    Request(#[source] hyper::http::Error),

    #[error("failed to send metrics")]
    Transport(#[source] hyper::Error),

    #[error("metrics service responded with {0}")]
    Status(hyper::StatusCode),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
