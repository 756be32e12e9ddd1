use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mobile_security::bridge::{
    device_ready, Callback, DeviceReadyTrigger, LockState, NativeBridge, PinCheck,
};

/// PIN check plugin with a scripted answer.
///
/// `None` drops both callbacks without answering. Answers are delivered from
/// a spawned task so callers observe them asynchronously.
#[derive(Clone, Debug)]
pub struct ScriptedPinCheck {
    answer: Option<LockState>,
    queries: Arc<AtomicUsize>,
}

impl ScriptedPinCheck {
    pub fn new(answer: Option<LockState>) -> Self {
        ScriptedPinCheck {
            answer,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn configured() -> Self {
        Self::new(Some(LockState::Configured))
    }

    pub fn not_configured() -> Self {
        Self::new(Some(LockState::NotConfigured))
    }

    pub fn silent() -> Self {
        Self::new(None)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl PinCheck for ScriptedPinCheck {
    fn is_pin_setup(&self, on_configured: Callback, on_not_configured: Callback) {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let answer = self.answer;
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            match answer {
                Some(LockState::Configured) => on_configured(),
                Some(LockState::NotConfigured) => on_not_configured(),
                None => {}
            }
        });
    }
}

/// A bridge with a present context and the given plugin, plus the trigger
/// that marks the device ready.
pub fn ready_bridge(plugin: Option<ScriptedPinCheck>) -> (DeviceReadyTrigger, NativeBridge) {
    let (trigger, ready) = device_ready();
    let bridge = NativeBridge::new(ready);
    let bridge = match plugin {
        Some(plugin) => bridge.with_pin_check(plugin),
        None => bridge,
    };

    (trigger, bridge)
}
