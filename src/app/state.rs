#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunTransition {
    Started,
    Stopped,
}

/// Everything the stopwatch knows. Only changed through the methods below
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    pub(crate) elapsed_ms: u64,
    pub(crate) running: bool,
    pub(crate) laps: Vec<u64>,
}

impl TimerState {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Recorded laps, oldest first
    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    pub fn can_record_lap(&self) -> bool {
        self.running && self.elapsed_ms > 0
    }

    pub(crate) fn toggle_running(&mut self) -> RunTransition {
        self.running = !self.running;
        if self.running {
            RunTransition::Started
        } else {
            RunTransition::Stopped
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = TimerState::default();
    }

    /// Returns whether a lap was appended
    pub(crate) fn record_lap(&mut self) -> bool {
        if !self.can_record_lap() {
            return false;
        }

        self.laps.push(self.elapsed_ms);
        true
    }

    /// Returns whether elapsed time was advanced
    pub(crate) fn tick(&mut self, delta_ms: u64) -> bool {
        if !self.running {
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn running_at(elapsed_ms: u64) -> TimerState {
        let mut state = TimerState::default();
        state.toggle_running();
        state.tick(elapsed_ms);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = TimerState::default();
        assert_eq!(state.elapsed_ms(), 0);
        assert!(!state.running());
        assert!(state.laps().is_empty());
        assert!(!state.can_record_lap());
    }

    #[test]
    fn test_toggle_freezes_and_resumes() {
        let mut state = TimerState::default();
        assert_eq!(state.toggle_running(), RunTransition::Started);
        assert!(state.tick(10));
        assert!(state.tick(10));
        assert_eq!(state.toggle_running(), RunTransition::Stopped);

        // Frozen while stopped
        assert!(!state.tick(10));
        assert_eq!(state.elapsed_ms(), 20);

        // Resumes from the frozen value
        state.toggle_running();
        state.tick(10);
        assert_eq!(state.elapsed_ms(), 30);
    }

    #[test]
    fn test_start_stop_without_ticks() {
        let mut state = running_at(500);
        state.toggle_running();
        state.toggle_running();
        assert_eq!(state.elapsed_ms(), 500);
    }

    #[test]
    fn test_lap_requires_running() {
        let mut state = running_at(500);
        state.toggle_running();
        assert!(!state.record_lap());
        assert!(state.laps().is_empty());
    }

    #[test]
    fn test_lap_requires_elapsed_time() {
        let mut state = TimerState::default();
        state.toggle_running();
        assert!(state.running());
        assert!(!state.record_lap());
        assert!(state.laps().is_empty());
    }

    #[test]
    fn test_laps_append_in_order() {
        let mut state = running_at(500);
        assert!(state.record_lap());
        assert_eq!(state.laps(), &[500]);

        state.tick(700);
        assert!(state.record_lap());
        assert_eq!(state.laps(), &[500, 1200]);

        // Same instant twice is allowed, order stays non-decreasing
        assert!(state.record_lap());
        assert_eq!(state.laps(), &[500, 1200, 1200]);
    }

    #[test]
    fn test_reset() {
        let mut state = running_at(500);
        state.record_lap();
        state.reset();
        assert_eq!(state, TimerState::default());

        // Nothing advances until started again
        assert!(!state.tick(10));
        assert_eq!(state.elapsed_ms(), 0);
    }

    #[test]
    fn test_tick_saturates() {
        let mut state = running_at(u64::MAX - 5);
        state.tick(10);
        assert_eq!(state.elapsed_ms(), u64::MAX);
    }

    #[test]
    fn test_elapsed_never_decreases() {
        // Every command interleaved with ticks, elapsed only drops on reset
        let mut state = TimerState::default();
        let mut last = 0;
        for step in 0..200u64 {
            match step % 7 {
                0 => {
                    state.toggle_running();
                }
                1 | 2 | 4 => {
                    state.tick(10);
                }
                3 => {
                    state.record_lap();
                }
                _ => {
                    state.tick(3);
                }
            }
            assert!(state.elapsed_ms() >= last);
            last = state.elapsed_ms();
            assert!(state.laps().windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
