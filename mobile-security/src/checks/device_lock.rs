use async_trait::async_trait;
use tracing::debug;

use crate::bridge::{query_lock_state, NativeBridge, PIN_CHECK_PLUGIN};
use crate::{CheckError, SecurityCheck, SecurityCheckResult};

pub const DEVICE_LOCK_CHECK_NAME: &str = "Device Lock Check";

/// Detects whether the device has a screen lock set.
///
/// The check passes when a lock is configured. A device without a lock is a
/// failed check, not an error.
#[derive(Debug, Clone)]
pub struct DeviceLockCheck {
    bridge: NativeBridge,
}

impl DeviceLockCheck {
    pub fn new(bridge: NativeBridge) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl SecurityCheck for DeviceLockCheck {
    fn name(&self) -> &str {
        DEVICE_LOCK_CHECK_NAME
    }

    async fn check(&self) -> Result<SecurityCheckResult, CheckError> {
        let mut ready = self
            .bridge
            .device_ready()
            .ok_or(CheckError::EnvironmentUnavailable)?;

        debug!("waiting for device readiness");
        ready.wait().await?;

        let plugin = self
            .bridge
            .pin_check()
            .ok_or(CheckError::PluginNotFound(PIN_CHECK_PLUGIN))?;

        let state = query_lock_state(plugin.as_ref()).await?;

        Ok(SecurityCheckResult::new(self.name(), state.is_configured()))
    }
}
