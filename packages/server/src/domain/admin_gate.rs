//! Process-wide switch for AI replies.

use std::sync::atomic::{AtomicBool, Ordering};

use super::error::AdminGateError;

/// Governs whether the AI responder may be called.
///
/// One instance lives in the application state; there is no per-room scoping.
#[derive(Debug)]
pub struct AdminGate {
    enabled: AtomicBool,
}

impl AdminGate {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Apply an untyped toggle value coming from the outside.
    ///
    /// Only a JSON boolean is accepted; anything else leaves the flag untouched.
    pub fn apply_toggle(&self, value: &serde_json::Value) -> Result<bool, AdminGateError> {
        let enabled = value
            .as_bool()
            .ok_or_else(|| AdminGateError::InvalidArgument(value.to_string()))?;
        self.set_enabled(enabled);
        Ok(enabled)
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new(true)
    }
}
