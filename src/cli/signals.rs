//! Ctrl+C handling for recording sessions

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Shutdown signal for a recording session.
///
/// Ctrl+C raises the shutdown flag and every linked stop flag, so the
/// take in progress ends early and no further takes start.
pub struct ShutdownSignal {
    shutdown: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the shutdown flag
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Listen for Ctrl+C in the background, raising `linked` with the
    /// shutdown flag
    pub fn setup(&self, linked: Vec<Arc<AtomicBool>>) {
        let shutdown = Arc::clone(&self.shutdown);

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received");
                shutdown.store(true, Ordering::SeqCst);
                for flag in &linked {
                    flag.store(true, Ordering::SeqCst);
                }
            }
        });
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
