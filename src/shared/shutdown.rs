//! Graceful shutdown plumbing
//!
//! One root [`ShutdownSignal`] fans out to the API server and the
//! background accrual and overdue tasks; triggering it once wakes
//! every waiter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

struct SignalInner {
    notify: broadcast::Sender<()>,
    fired: AtomicBool,
}

/// Cloneable handle to the shared shutdown state
#[derive(Clone)]
pub struct ShutdownSignal {
    inner: Arc<SignalInner>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self {
            inner: Arc::new(SignalInner {
                notify,
                fired: AtomicBool::new(false),
            }),
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.fired.load(Ordering::SeqCst)
    }

    /// Fire the signal. Idempotent; only the first call broadcasts.
    pub fn trigger(&self) {
        if !self.inner.fired.swap(true, Ordering::SeqCst) {
            info!("🛑 Shutdown signal triggered");
            let _ = self.inner.notify.send(());
        }
    }

    /// Resolve once shutdown has been triggered (immediately if it
    /// already was).
    pub async fn wait(&self) {
        self.notified().wait().await
    }

    /// A detached future for use inside `tokio::select!` arms.
    pub fn notified(&self) -> ShutdownNotified {
        ShutdownNotified {
            receiver: self.inner.notify.subscribe(),
            inner: self.inner.clone(),
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Future side of [`ShutdownSignal::notified`]
pub struct ShutdownNotified {
    receiver: broadcast::Receiver<()>,
    inner: Arc<SignalInner>,
}

impl ShutdownNotified {
    pub async fn wait(mut self) {
        // The flag covers triggers that happened before we subscribed
        if self.inner.fired.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.receiver.recv().await;
    }
}

/// Owns the root signal and the OS signal listener task
pub struct ShutdownCoordinator {
    signal: ShutdownSignal,
    timeout_secs: u64,
}

impl ShutdownCoordinator {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            signal: ShutdownSignal::new(),
            timeout_secs,
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    /// Seconds cleanup is allowed after the signal fires
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Spawn a task that trips the signal on SIGTERM/SIGINT.
    pub fn start_signal_listener(&self) {
        let signal = self.signal.clone();
        tokio::spawn(async move {
            wait_for_os_signal().await;
            signal.trigger();
        });
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(unix)]
async fn wait_for_os_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => info!("📡 Received SIGTERM signal"),
        _ = sigint.recv() => info!("📡 Received SIGINT signal (Ctrl+C)"),
    }
}

#[cfg(not(unix))]
async fn wait_for_os_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("📡 Received Ctrl+C signal");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_wakes_waiters() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_triggered());

        let waiter = signal.notified();
        signal.trigger();

        waiter.wait().await;
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn wait_after_trigger_returns_immediately() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.wait().await;
    }

    #[tokio::test]
    async fn second_trigger_is_a_noop() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.trigger();
        signal.wait().await;
    }
}
