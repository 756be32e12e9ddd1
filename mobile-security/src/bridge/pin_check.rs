use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use super::BridgeError;

pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Native plugin reporting whether the device has a screen lock configured.
///
/// The plugin invokes exactly one of the two callbacks, possibly from
/// another thread and at any later time.
pub trait PinCheck: Send + Sync {
    fn is_pin_setup(&self, on_configured: Callback, on_not_configured: Callback);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Configured,
    NotConfigured,
}

impl LockState {
    pub fn is_configured(self) -> bool {
        self == LockState::Configured
    }
}

/// Issues a single lock state query and waits for the plugin to answer.
///
/// Only the first callback invocation counts.
pub async fn query_lock_state(plugin: &dyn PinCheck) -> Result<LockState, BridgeError> {
    let (sender, receiver) = oneshot::channel();
    let sender = Arc::new(Mutex::new(Some(sender)));

    let settle = |state: LockState| -> Callback {
        let sender = sender.clone();
        Box::new(move || {
            if let Some(sender) = sender.lock().take() {
                // receiver may already be gone if the caller lost interest
                let _ = sender.send(state);
            }
        })
    };

    plugin.is_pin_setup(
        settle(LockState::Configured),
        settle(LockState::NotConfigured),
    );
    drop(sender);

    let state = receiver.await.map_err(|_| BridgeError::CallbackDropped)?;
    debug!(message = "lock state reported by plugin", state = ?state);

    Ok(state)
}

#[cfg(test)]
mod tests {
    use matches::assert_matches;

    use super::*;

    struct Answer(Option<LockState>);

    impl PinCheck for Answer {
        fn is_pin_setup(&self, on_configured: Callback, on_not_configured: Callback) {
            match self.0 {
                Some(LockState::Configured) => on_configured(),
                Some(LockState::NotConfigured) => on_not_configured(),
                None => {}
            }
        }
    }

    struct BothCallbacks;

    impl PinCheck for BothCallbacks {
        fn is_pin_setup(&self, on_configured: Callback, on_not_configured: Callback) {
            on_not_configured();
            on_configured();
        }
    }

    struct FromThread;

    impl PinCheck for FromThread {
        fn is_pin_setup(&self, on_configured: Callback, _on_not_configured: Callback) {
            std::thread::spawn(on_configured);
        }
    }

    #[tokio::test]
    async fn reports_configured() {
        let state = query_lock_state(&Answer(Some(LockState::Configured))).await;
        assert_matches!(state, Ok(LockState::Configured));
    }

    #[tokio::test]
    async fn reports_not_configured() {
        let state = query_lock_state(&Answer(Some(LockState::NotConfigured))).await;
        assert_matches!(state, Ok(LockState::NotConfigured));
    }

    #[tokio::test]
    async fn first_callback_wins() {
        let state = query_lock_state(&BothCallbacks).await;
        assert_matches!(state, Ok(LockState::NotConfigured));
    }

    #[tokio::test]
    async fn accepts_answer_from_another_thread() {
        let state = query_lock_state(&FromThread).await;
        assert_matches!(state, Ok(LockState::Configured));
    }

    #[tokio::test]
    async fn fails_when_callbacks_are_dropped() {
        let state = query_lock_state(&Answer(None)).await;
        assert_matches!(state, Err(BridgeError::CallbackDropped));
    }
}
