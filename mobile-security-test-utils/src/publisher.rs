use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use mobile_security::{MetricsPublisher, MetricsRecord, PublishError};

#[derive(Clone, Debug, PartialEq)]
pub struct PublishCall {
    pub key: String,
    pub records: Vec<MetricsRecord>,
}

/// Records every publish call. Optionally fails all of them.
#[derive(Clone, Default)]
pub struct TestMetricsPublisher {
    calls: Arc<Mutex<Vec<PublishCall>>>,
    fail: bool,
}

impl TestMetricsPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fail(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl MetricsPublisher for TestMetricsPublisher {
    async fn publish(&self, key: &str, records: &[MetricsRecord]) -> Result<(), PublishError> {
        self.calls.lock().push(PublishCall {
            key: key.to_string(),
            records: records.to_vec(),
        });

        if self.fail {
            Err(anyhow::anyhow!("metrics service unavailable").into())
        } else {
            Ok(())
        }
    }
}
