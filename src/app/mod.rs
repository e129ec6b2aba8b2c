mod state;
mod ticker;

pub use state::TimerState;
pub use ticker::TickId;

use crate::{
    app::{state::RunTransition, ticker::Ticker},
    config::TickConfig,
};

use anyhow::{Context, Result};
use log::{debug, error, info};

use std::{
    ops::ControlFlow,
    sync::mpsc::{Receiver, Sender},
};

#[derive(Debug)]
pub enum AppRequest {
    ToggleRunning,
    Reset,
    RecordLap,
    Tick {
        id: TickId,
        delta_ms: u64,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum AppEvent {
    StateUpdated(TimerState),
}

/// Owns the stopwatch state and serializes every change to it
pub struct App {
    tx: Sender<AppEvent>,
    rx: Receiver<AppRequest>,
    // Handed to tick sources so ticks queue behind user commands
    request_tx: Sender<AppRequest>,
    config: TickConfig,
    state: TimerState,
    ticker: Option<Ticker>,
    next_tick_id: u64,
}

impl App {
    pub fn new(
        event_tx: Sender<AppEvent>,
        request_tx: Sender<AppRequest>,
        request_rx: Receiver<AppRequest>,
        config: TickConfig,
    ) -> App {
        App {
            tx: event_tx,
            rx: request_rx,
            request_tx,
            config,
            state: TimerState::default(),
            ticker: None,
            next_tick_id: 0,
        }
    }

    /// Serve requests until `AppRequest::Shutdown`. The app holds a request sender for its tick
    /// sources, so the channel never disconnects on its own and callers must send `Shutdown`
    pub fn run(&mut self) {
        if let Err(e) = self.publish_state() {
            error!("{:?}", e);
        }

        while let Ok(req) = self.rx.recv() {
            match self.handle_req(req) {
                Ok(ControlFlow::Continue(())) => (),
                Ok(ControlFlow::Break(())) => break,
                Err(e) => error!("{:?}", e),
            }
        }

        self.stop_ticker();
    }

    fn handle_req(&mut self, req: AppRequest) -> Result<ControlFlow<()>> {
        let changed = match req {
            AppRequest::ToggleRunning => {
                self.toggle_running()?;
                true
            }
            AppRequest::Reset => {
                self.stop_ticker();
                self.state.reset();
                true
            }
            AppRequest::RecordLap => {
                let recorded = self.state.record_lap();
                if !recorded {
                    debug!("Ignoring lap request, stopwatch not running or at zero");
                }
                recorded
            }
            AppRequest::Tick { id, delta_ms } => {
                if self.ticker.as_ref().map(Ticker::id) != Some(id) {
                    debug!("Dropping stale tick from {}", id);
                    return Ok(ControlFlow::Continue(()));
                }
                self.state.tick(delta_ms)
            }
            AppRequest::Shutdown => {
                info!("Shutdown requested");
                self.stop_ticker();
                return Ok(ControlFlow::Break(()));
            }
        };

        if changed {
            self.publish_state()?;
        }

        Ok(ControlFlow::Continue(()))
    }

    fn toggle_running(&mut self) -> Result<()> {
        if self.state.running() {
            self.stop_ticker();
        } else {
            // Started before flipping the state so a failed spawn leaves the stopwatch stopped
            let id = TickId(self.next_tick_id);
            self.next_tick_id += 1;
            let ticker = Ticker::spawn(id, self.config, self.request_tx.clone())
                .context("Failed to start stopwatch")?;
            self.ticker = Some(ticker);
        }

        match self.state.toggle_running() {
            RunTransition::Started => info!("Stopwatch started at {}ms", self.state.elapsed_ms()),
            RunTransition::Stopped => info!("Stopwatch stopped at {}ms", self.state.elapsed_ms()),
        }

        Ok(())
    }

    fn stop_ticker(&mut self) {
        // Dropping joins the tick thread
        self.ticker = None;
    }

    fn publish_state(&self) -> Result<()> {
        self.tx
            .send(AppEvent::StateUpdated(self.state.clone()))
            .context("Failed to send state to gui")
    }
}
