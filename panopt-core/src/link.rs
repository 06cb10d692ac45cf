//! Serial link health monitoring
//!
//! The host agent sends roughly one record per second. The link is
//! considered lost once no record has decoded for
//! [`DISCONNECT_TIMEOUT_MS`]; it recovers on the very next successful
//! decode. Only the *edges* of that state are reported to the caller -
//! a steadily disconnected link must not force a redraw every cycle.

/// Time without a successful decode before the link counts as lost (ms)
pub const DISCONNECT_TIMEOUT_MS: u64 = 3000;

/// Tracks the last successful decode and the derived connection state
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    last_success_ms: u64,
    connected: bool,
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkMonitor {
    /// Create a monitor in the disconnected state
    pub fn new() -> Self {
        Self {
            last_success_ms: 0,
            connected: false,
        }
    }

    /// Record a successful decode
    ///
    /// Returns true if this was the false->true transition, which the
    /// caller should treat as a redraw trigger.
    pub fn on_decode_success(&mut self, now_ms: u64) -> bool {
        self.last_success_ms = now_ms;
        let transitioned = !self.connected;
        self.connected = true;
        transitioned
    }

    /// Re-evaluate the timeout, once per control cycle
    ///
    /// Returns true only on the true->false transition.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.connected && now_ms.saturating_sub(self.last_success_ms) > DISCONNECT_TIMEOUT_MS {
            self.connected = false;
            return true;
        }
        false
    }

    /// Current connection state
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Timestamp of the last successful decode (ms)
    pub fn last_success_ms(&self) -> u64 {
        self.last_success_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_disconnected() {
        let monitor = LinkMonitor::new();
        assert!(!monitor.is_connected());
    }

    #[test]
    fn test_decode_success_connects_with_edge() {
        let mut monitor = LinkMonitor::new();
        assert!(monitor.on_decode_success(100));
        assert!(monitor.is_connected());

        // Further successes keep the state without reporting an edge
        assert!(!monitor.on_decode_success(200));
        assert!(monitor.is_connected());
    }

    #[test]
    fn test_timeout_is_strictly_greater_than_threshold() {
        let mut monitor = LinkMonitor::new();
        monitor.on_decode_success(1000);

        // Exactly at the threshold: still connected
        assert!(!monitor.tick(1000 + DISCONNECT_TIMEOUT_MS));
        assert!(monitor.is_connected());

        // One millisecond past: the edge fires once
        assert!(monitor.tick(1001 + DISCONNECT_TIMEOUT_MS));
        assert!(!monitor.is_connected());

        // Steady disconnected state reports no further edges
        assert!(!monitor.tick(10_000 + DISCONNECT_TIMEOUT_MS));
    }

    #[test]
    fn test_reconnect_after_loss() {
        let mut monitor = LinkMonitor::new();
        monitor.on_decode_success(0);
        assert!(monitor.tick(DISCONNECT_TIMEOUT_MS + 1));

        assert!(monitor.on_decode_success(DISCONNECT_TIMEOUT_MS + 500));
        assert!(monitor.is_connected());
    }

    proptest! {
        /// The link never drops while successes keep arriving inside the
        /// timeout window.
        #[test]
        fn prop_no_disconnect_within_timeout(gaps in proptest::collection::vec(0u64..=DISCONNECT_TIMEOUT_MS, 1..50)) {
            let mut monitor = LinkMonitor::new();
            let mut now = 0u64;
            monitor.on_decode_success(now);

            for gap in gaps {
                now += gap;
                prop_assert!(!monitor.tick(now));
                prop_assert!(monitor.is_connected());
                monitor.on_decode_success(now);
            }
        }
    }
}
