//! Periodic timers driven by the host's fixed timestep.
//!
//! A timer never fires on its own: the session feeds it elapsed time with
//! [`PeriodicTimer::advance`] and then drains due periods with [`PeriodicTimer::poll`].
//! Cancelling discards any accumulated time, so a cancelled timer can never fire late.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTimer {
    period_ms: u32,
    elapsed_ms: u32,
    running: bool,
}

impl PeriodicTimer {
    /// A stopped timer. A zero period is treated as 1ms.
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
            running: false,
        }
    }

    /// Time accumulated toward the next fire.
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// (Re)start from zero.
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed_ms = 0;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        }
    }

    /// Consume one due period. Returns false once nothing is due or the timer stopped.
    pub fn poll(&mut self) -> bool {
        if !self.running || self.elapsed_ms < self.period_ms {
            return false;
        }
        self.elapsed_ms -= self.period_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = PeriodicTimer::new(500);
        timer.advance(10_000);
        assert!(!timer.poll());
        assert_eq!(timer.elapsed_ms(), 0);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = PeriodicTimer::new(500);
        timer.start();
        for _ in 0..31 {
            timer.advance(16);
        }
        // 496ms
        assert!(!timer.poll());
        timer.advance(16);
        assert!(timer.poll());
        assert!(!timer.poll());
        assert_eq!(timer.elapsed_ms(), 12);
    }

    #[test]
    fn test_large_step_fires_repeatedly() {
        let mut timer = PeriodicTimer::new(1000);
        timer.start();
        timer.advance(3500);
        let mut fires = 0;
        while timer.poll() {
            fires += 1;
        }
        assert_eq!(fires, 3);
    }

    #[test]
    fn test_cancel_discards_pending_time() {
        let mut timer = PeriodicTimer::new(500);
        timer.start();
        timer.advance(1200);
        assert!(timer.poll());
        timer.cancel();
        assert!(!timer.poll());
        timer.start();
        assert_eq!(timer.elapsed_ms(), 0);
    }
}
