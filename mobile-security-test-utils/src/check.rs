use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use mobile_security::{CheckError, SecurityCheck, SecurityCheckResult};

#[derive(Clone, Debug)]
pub enum Outcome {
    Pass,
    Fail,
    Error(String),
    Hang,
}

/// A check with a scripted outcome that counts how often it ran.
#[derive(Clone, Debug)]
pub struct TestCheck {
    name: String,
    outcome: Outcome,
    delay: Option<Duration>,
    runs: Arc<AtomicUsize>,
}

impl TestCheck {
    pub fn new(name: &str, outcome: Outcome) -> Self {
        TestCheck {
            name: name.to_string(),
            outcome,
            delay: None,
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn passing(name: &str) -> Self {
        Self::new(name, Outcome::Pass)
    }

    pub fn failing(name: &str) -> Self {
        Self::new(name, Outcome::Fail)
    }

    pub fn erroring(name: &str, message: &str) -> Self {
        Self::new(name, Outcome::Error(message.to_string()))
    }

    pub fn hanging(name: &str) -> Self {
        Self::new(name, Outcome::Hang)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecurityCheck for TestCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<SecurityCheckResult, CheckError> {
        self.runs.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            Outcome::Pass => Ok(SecurityCheckResult::new(self.name.clone(), true)),
            Outcome::Fail => Ok(SecurityCheckResult::new(self.name.clone(), false)),
            Outcome::Error(message) => Err(anyhow::anyhow!("{}", message).into()),
            Outcome::Hang => std::future::pending().await,
        }
    }
}
