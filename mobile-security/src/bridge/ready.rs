use tokio::sync::watch;

use super::BridgeError;

/// Creates a readiness signal and the trigger that fires it.
pub fn device_ready() -> (DeviceReadyTrigger, DeviceReady) {
    let (sender, receiver) = watch::channel(false);
    (DeviceReadyTrigger { sender }, DeviceReady { receiver })
}

/// Fires the readiness signal once. Firing again has no effect.
#[derive(Debug)]
pub struct DeviceReadyTrigger {
    sender: watch::Sender<bool>,
}

impl DeviceReadyTrigger {
    pub fn fire(&self) {
        self.sender.send_replace(true);
    }
}

/// Waits for the host to report it is ready for native calls.
///
/// Handles that start waiting after the signal fired complete immediately.
#[derive(Debug, Clone)]
pub struct DeviceReady {
    receiver: watch::Receiver<bool>,
}

impl DeviceReady {
    pub fn is_ready(&self) -> bool {
        *self.receiver.borrow()
    }

    pub async fn wait(&mut self) -> Result<(), BridgeError> {
        loop {
            if self.is_ready() {
                return Ok(());
            }

            self.receiver
                .changed()
                .await
                .map_err(|_| BridgeError::ReadinessAbandoned)?;
        }
    }
}
