use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::bridge::BridgeError;

/// A named, asynchronous probe of one security-relevant device property.
///
/// Implementations must report every failure through the returned `Result`.
/// The runner never wraps or translates the error a check produces.
#[async_trait]
pub trait SecurityCheck: Send + Sync {
    fn name(&self) -> &str;

    async fn check(&self) -> Result<SecurityCheckResult, CheckError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityCheckResult {
    name: String,
    passed: bool,
}

impl SecurityCheckResult {
    pub fn new(name: impl Into<String>, passed: bool) -> Self {
        Self {
            name: name.into(),
            passed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passed(&self) -> bool {
        self.passed
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("native bridge context is not available, the host is not fully loaded")]
    EnvironmentUnavailable,

    #[error("could not find plugin {0}")]
    PluginNotFound(&'static str),

    #[error("native bridge call failed")]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
