use std::time::{Duration, Instant};

pub(crate) struct Timer {
    start: Instant,
}

impl Timer {
    pub(crate) fn new() -> Timer {
        Timer {
            start: Instant::now(),
        }
    }

    /// Time since construction or the previous lap. Restarts the measurement from the same
    /// instant that was read, so consecutive laps never skip time between them
    pub(crate) fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.start);
        self.start = now;
        elapsed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn laps_are_contiguous() {
        let mut timer = Timer::new();
        std::thread::sleep(Duration::from_millis(5));
        let first = timer.lap();
        assert!(first >= Duration::from_millis(5));

        // Fresh measurement after the lap
        let second = timer.lap();
        assert!(second < first);
    }
}
