use crate::{
    app::AppRequest,
    config::{TickConfig, TickMode},
    util::Timer,
};

use anyhow::{Context, Result};
use log::{debug, error, info};

use std::{
    fmt,
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

/// Identifies one started tick source. Ticks from any other source are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(pub(crate) u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick-{}", self.0)
    }
}

/// Handle to a thread delivering `AppRequest::Tick` at a fixed interval.
///
/// The thread is cancelled and joined when the handle is dropped. Once the drop returns, the
/// source will not send anything else.
pub(crate) struct Ticker {
    id: TickId,
    cancel_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    pub(crate) fn spawn(id: TickId, config: TickConfig, tx: Sender<AppRequest>) -> Result<Ticker> {
        let (cancel_tx, cancel_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name(id.to_string())
            .spawn(move || run_ticks(id, config, &cancel_rx, &tx))
            .with_context(|| format!("Failed to spawn tick thread for {}", id))?;

        debug!("Started {} every {:?}", id, config.interval);

        Ok(Ticker {
            id,
            cancel_tx: Some(cancel_tx),
            thread: Some(thread),
        })
    }

    pub(crate) fn id(&self) -> TickId {
        self.id
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        // Disconnecting wakes the thread out of its wait immediately
        drop(self.cancel_tx.take());

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Tick thread for {} panicked", self.id);
            }
        }

        debug!("Stopped {}", self.id);
    }
}

fn run_ticks(id: TickId, config: TickConfig, cancel_rx: &Receiver<()>, tx: &Sender<AppRequest>) {
    let mut delta = TickDelta::new(config);

    loop {
        match cancel_rx.recv_timeout(config.interval) {
            Err(RecvTimeoutError::Timeout) => (),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }

        let delta_ms = delta.next();
        if delta_ms == 0 {
            continue;
        }

        if tx.send(AppRequest::Tick { id, delta_ms }).is_err() {
            info!("App handle is no longer valid, stopping {}", id);
            return;
        }
    }
}

/// How far a single tick advances the stopwatch
struct TickDelta {
    mode: TickMode,
    interval: Duration,
    timer: Timer,
    carry: Duration,
}

impl TickDelta {
    fn new(config: TickConfig) -> TickDelta {
        TickDelta {
            mode: config.mode,
            interval: config.interval,
            timer: Timer::new(),
            carry: Duration::ZERO,
        }
    }

    fn next(&mut self) -> u64 {
        let elapsed = match self.mode {
            TickMode::Fixed => self.interval,
            TickMode::WallClock => self.timer.lap(),
        };
        self.accumulate(elapsed)
    }

    /// Whole milliseconds out of the elapsed time, the remainder is kept for the next tick
    fn accumulate(&mut self, elapsed: Duration) -> u64 {
        self.carry += elapsed;
        let whole_ms = self.carry.as_millis() as u64;
        self.carry -= Duration::from_millis(whole_ms);
        whole_ms
    }
}
