//! Graceful shutdown handling for the application.
//!
//! A single flag is shared by the Ctrl+C listener, the TUI quit key and the
//! simulation loop, which checks it between steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Manages graceful shutdown of the application.
#[derive(Debug, Clone)]
pub struct ShutdownManager {
    shutdown_requested: Arc<AtomicBool>,
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests shutdown.
    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        tracing::info!("Shutdown requested");
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    /// The flag handed to `Simulation::run`.
    pub fn flag(&self) -> &AtomicBool {
        &self.shutdown_requested
    }

    /// Spawns a task that requests shutdown on Ctrl+C. Must be called from
    /// inside a tokio runtime.
    pub fn listen_for_ctrl_c(&self) {
        let flag = self.shutdown_requested.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl+C received, initiating graceful shutdown...");
                flag.store(true, Ordering::SeqCst);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_manager_new() {
        let manager = ShutdownManager::new();
        assert!(!manager.is_shutdown_requested());
    }

    #[test]
    fn test_shutdown_request_is_shared() {
        let manager = ShutdownManager::new();
        let clone = manager.clone();
        clone.request_shutdown();
        assert!(manager.is_shutdown_requested());
        assert!(manager.flag().load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_listener_spawns_inside_runtime() {
        let manager = ShutdownManager::new();
        manager.listen_for_ctrl_c();
        assert!(!manager.is_shutdown_requested());
    }
}
