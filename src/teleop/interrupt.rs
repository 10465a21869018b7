use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// User-initiated stop request shared between the loop and its input sources
///
/// Raised either locally (e.g. Ctrl+C read as a key event in raw mode) or by
/// the process signal handler installed in `system::signal`.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
    os_signal: Option<&'static AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also observe a flag set from an OS signal handler
    pub fn with_os_signal(signal: &'static AtomicBool) -> Self {
        Self {
            raised: Arc::default(),
            os_signal: Some(signal),
        }
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
            || self.os_signal.is_some_and(|s| s.load(Ordering::SeqCst))
    }
}
