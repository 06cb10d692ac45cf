//! Redraw scheduling
//!
//! Once per control cycle, after state updates, the scheduler decides
//! whether the selected layout gets rendered. The decision is read-only;
//! the caller commits with [`RenderScheduler::mark_redrawn`] after the
//! flush actually happened.

/// Interval after which a frame is repainted even without triggers (ms)
pub const KEEPALIVE_INTERVAL_MS: u64 = 200;

/// Redraw strategy
///
/// The two strategies observed in the field, made an explicit choice
/// instead of an accident of which firmware variant shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RedrawPolicy {
    /// Redraw on explicit triggers, or when the keep-alive interval
    /// elapses without one. The default.
    #[default]
    OnTrigger,
    /// Redraw unconditionally every cycle
    EveryCycle,
}

/// The per-cycle redraw triggers, OR'd together
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawTriggers {
    /// A telemetry record decoded this cycle
    pub data_updated: bool,
    /// The link transitioned online or offline this cycle
    pub link_edge: bool,
    /// A layout repaint is pending
    pub layout_changed: bool,
}

impl RedrawTriggers {
    /// Whether any trigger fired
    pub fn any(&self) -> bool {
        self.data_updated || self.link_edge || self.layout_changed
    }
}

/// Decides when to redraw, tracking the keep-alive timer
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    policy: RedrawPolicy,
    last_redraw_ms: u64,
}

impl RenderScheduler {
    /// Create a scheduler with the given policy
    pub fn new(policy: RedrawPolicy) -> Self {
        Self {
            policy,
            last_redraw_ms: 0,
        }
    }

    /// The configured policy
    pub fn policy(&self) -> RedrawPolicy {
        self.policy
    }

    /// Decide whether this cycle renders
    pub fn should_redraw(&self, now_ms: u64, triggers: &RedrawTriggers) -> bool {
        match self.policy {
            RedrawPolicy::EveryCycle => true,
            RedrawPolicy::OnTrigger => {
                triggers.any()
                    || now_ms.saturating_sub(self.last_redraw_ms) > KEEPALIVE_INTERVAL_MS
            }
        }
    }

    /// Commit a completed render, resetting the keep-alive timer
    pub fn mark_redrawn(&mut self, now_ms: u64) {
        self.last_redraw_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: RedrawTriggers = RedrawTriggers {
        data_updated: false,
        link_edge: false,
        layout_changed: false,
    };

    #[test]
    fn test_each_trigger_fires_alone() {
        let scheduler = RenderScheduler::new(RedrawPolicy::OnTrigger);

        for triggers in [
            RedrawTriggers { data_updated: true, ..NONE },
            RedrawTriggers { link_edge: true, ..NONE },
            RedrawTriggers { layout_changed: true, ..NONE },
        ] {
            assert!(scheduler.should_redraw(0, &triggers));
        }
    }

    #[test]
    fn test_quiet_cycles_do_not_redraw_within_keepalive() {
        let mut scheduler = RenderScheduler::new(RedrawPolicy::OnTrigger);
        scheduler.mark_redrawn(1000);

        assert!(!scheduler.should_redraw(1100, &NONE));
        assert!(!scheduler.should_redraw(1000 + KEEPALIVE_INTERVAL_MS, &NONE));
        assert!(scheduler.should_redraw(1001 + KEEPALIVE_INTERVAL_MS, &NONE));
    }

    #[test]
    fn test_mark_redrawn_resets_keepalive() {
        let mut scheduler = RenderScheduler::new(RedrawPolicy::OnTrigger);
        scheduler.mark_redrawn(1000);
        scheduler.mark_redrawn(1201);

        assert!(!scheduler.should_redraw(1300, &NONE));
    }

    #[test]
    fn test_every_cycle_policy_ignores_triggers() {
        let mut scheduler = RenderScheduler::new(RedrawPolicy::EveryCycle);
        scheduler.mark_redrawn(1000);

        assert!(scheduler.should_redraw(1001, &NONE));
    }
}
