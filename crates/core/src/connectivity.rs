//! Connectivity monitor contract and a watch-channel-backed implementation.

use tokio::sync::watch;

/// Reports whether outbound network access is currently usable.
///
/// The engine only consults [`is_available_now`](Self::is_available_now)
/// before opportunistic mirrors and flush passes; hosts that want to trigger
/// a flush on reconnect subscribe via [`observe`](Self::observe).
pub trait ConnectivityMonitor: Send + Sync {
    /// Point-in-time connectivity check.
    fn is_available_now(&self) -> bool;

    /// Stream of connectivity changes.
    fn observe(&self) -> watch::Receiver<bool>;
}

/// Connectivity monitor fed by the host platform (or by tests).
#[derive(Debug)]
pub struct WatchConnectivity {
    tx: watch::Sender<bool>,
}

impl WatchConnectivity {
    pub fn new(initially_online: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_online);
        Self { tx }
    }

    /// Record a connectivity transition reported by the platform.
    pub fn set_online(&self, online: bool) {
        // send_replace never fails; the sender keeps its own receiver alive.
        self.tx.send_replace(online);
    }
}

impl ConnectivityMonitor for WatchConnectivity {
    fn is_available_now(&self) -> bool {
        *self.tx.borrow()
    }

    fn observe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn observers_see_transitions() {
        let monitor = WatchConnectivity::new(false);
        let mut rx = monitor.observe();
        assert!(!monitor.is_available_now());

        monitor.set_online(true);
        rx.changed().await.expect("sender alive");
        assert!(*rx.borrow());
        assert!(monitor.is_available_now());
    }
}
