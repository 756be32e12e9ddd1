use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, error, info, warn};

use crate::metrics::{CheckResultMetrics, HttpMetricsPublisher, MetricsPublisher, PublishError};
use crate::settings::Settings;
use crate::{CheckError, SecurityCheck, SecurityCheckResult, SecurityCheckResultMetric};

pub const METRICS_KEY: &str = "security";

/// Runs security checks and optionally reports their results as metrics.
///
/// Metrics are only available when the service is given a publisher. Without
/// one, every publishing operation fails with
/// [`SecurityError::MetricsNotConfigured`] while plain checks keep working.
#[derive(Clone, Default)]
pub struct SecurityService {
    metrics: Option<Arc<dyn MetricsPublisher>>,
}

impl SecurityService {
    pub fn new(metrics: Option<Arc<dyn MetricsPublisher>>) -> Self {
        Self { metrics }
    }

    pub fn with_metrics<P>(publisher: P) -> Self
    where
        P: MetricsPublisher + 'static,
    {
        Self::new(Some(Arc::new(publisher)))
    }

    pub fn without_metrics() -> Self {
        Self::new(None)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let metrics = settings.metrics();
        if metrics.enabled() {
            let publisher = HttpMetricsPublisher::new(metrics.url().clone(), metrics.client_id());
            Self::with_metrics(publisher)
        } else {
            Self::without_metrics()
        }
    }

    pub fn has_metrics(&self) -> bool {
        self.metrics.is_some()
    }

    pub async fn check(&self, check: &dyn SecurityCheck) -> Result<SecurityCheckResult, CheckError> {
        debug!(message = "running security check", check = check.name());
        check.check().await
    }

    /// Runs all checks concurrently. Results follow the order of `checks`.
    ///
    /// Fails with the first error any check reports. Checks still running at
    /// that point are dropped.
    pub async fn check_many(
        &self,
        checks: &[&dyn SecurityCheck],
    ) -> Result<Vec<SecurityCheckResult>, CheckError> {
        debug!(message = "running security checks", count = checks.len());
        try_join_all(checks.iter().map(|check| check.check())).await
    }

    pub async fn check_and_publish_metric(
        &self,
        check: &dyn SecurityCheck,
    ) -> Result<SecurityCheckResultMetric, SecurityError> {
        let result = self.check(check).await?;
        let metric = SecurityCheckResultMetric::from(&result);
        self.publish_check_result_metrics(vec![result]).await?;

        Ok(metric)
    }

    pub async fn check_many_and_publish_metric(
        &self,
        checks: &[&dyn SecurityCheck],
    ) -> Result<Vec<SecurityCheckResultMetric>, SecurityError> {
        let results = self.check_many(checks).await?;
        self.publish_check_result_metrics(results).await
    }

    async fn publish_check_result_metrics(
        &self,
        results: Vec<SecurityCheckResult>,
    ) -> Result<Vec<SecurityCheckResultMetric>, SecurityError> {
        if results.is_empty() {
            return Ok(Vec::new());
        }

        let metrics = CheckResultMetrics::new(results);
        let publisher = self.metrics.as_ref().ok_or_else(|| {
            warn!("metrics publisher is not configured, check results were not published");
            SecurityError::MetricsNotConfigured
        })?;

        let record = metrics.record()?;
        if let Err(e) = publisher.publish(METRICS_KEY, &[record]).await {
            error!(message = "failed to publish security check metrics", err = %e);
            return Err(e.into());
        }

        info!(message = "published security check metrics", count = metrics.len());
        Ok(metrics.collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    #[error(transparent)]
    Check(#[from] CheckError),

    #[error("Metrics configuration is not available.")]
    MetricsNotConfigured,

    #[error(transparent)]
    Publish(#[from] PublishError),
}
