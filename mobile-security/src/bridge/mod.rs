//! Adapters over the native device bridge.
//!
//! The host exposes its capabilities through callbacks and a one-time
//! readiness event. Everything in this module turns those into futures so
//! that checks only ever deal with `async` code.

mod pin_check;
mod ready;

use std::fmt;
use std::sync::Arc;

pub use self::pin_check::{query_lock_state, Callback, LockState, PinCheck};
pub use self::ready::{device_ready, DeviceReady, DeviceReadyTrigger};

pub const PIN_CHECK_PLUGIN: &str = "PinCheck";

/// Host context a native check runs against.
///
/// An unavailable bridge models a host without a document context, where no
/// readiness event will ever be delivered.
#[derive(Clone, Default)]
pub struct NativeBridge {
    ready: Option<DeviceReady>,
    pin_check: Option<Arc<dyn PinCheck>>,
}

impl NativeBridge {
    pub fn new(ready: DeviceReady) -> Self {
        Self {
            ready: Some(ready),
            pin_check: None,
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pin_check<P>(mut self, plugin: P) -> Self
    where
        P: PinCheck + 'static,
    {
        self.pin_check = Some(Arc::new(plugin));
        self
    }

    pub fn is_available(&self) -> bool {
        self.ready.is_some()
    }

    pub fn device_ready(&self) -> Option<DeviceReady> {
        self.ready.clone()
    }

    pub fn pin_check(&self) -> Option<Arc<dyn PinCheck>> {
        self.pin_check.clone()
    }
}

impl fmt::Debug for NativeBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBridge")
            .field("ready", &self.ready)
            .field("pin_check", &self.pin_check.is_some())
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("device readiness can no longer be signalled")]
    ReadinessAbandoned,

    #[error("plugin dropped its callbacks without reporting a result")]
    CallbackDropped,
}
