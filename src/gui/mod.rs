mod lap_list;

use crate::{
    app::{AppEvent, AppRequest, TimerState},
    format::format_elapsed,
};

use anyhow::{Context, Result};
use eframe::{
    egui::{
        self, vec2, Button, CentralPanel, Color32, Event, Frame, Key, Margin, RichText, Rounding,
        Stroke, Ui, Visuals,
    },
    CreationContext,
};
use log::{debug, error, warn};

use std::sync::{
    mpsc::{Receiver, Sender},
    Arc, Mutex, MutexGuard,
};

const BACKGROUND: Color32 = Color32::from_rgb(15, 23, 42);
const CARD_FILL: Color32 = Color32::from_rgba_premultiplied(26, 26, 26, 26);
const CARD_STROKE: Color32 = Color32::from_rgba_premultiplied(51, 51, 51, 51);
const SUBTITLE: Color32 = Color32::from_rgb(203, 213, 225);
const START_GREEN: Color32 = Color32::from_rgb(34, 197, 94);
const PAUSE_RED: Color32 = Color32::from_rgb(239, 68, 68);
const LAP_BLUE: Color32 = Color32::from_rgb(37, 99, 235);

const CONTROL_SIZE: egui::Vec2 = vec2(130.0, 52.0);
const MAX_CONTENT_WIDTH: f32 = 448.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopwatchAction {
    ToggleRunning,
    Reset,
    RecordLap,
}

impl From<StopwatchAction> for AppRequest {
    fn from(action: StopwatchAction) -> AppRequest {
        match action {
            StopwatchAction::ToggleRunning => AppRequest::ToggleRunning,
            StopwatchAction::Reset => AppRequest::Reset,
            StopwatchAction::RecordLap => AppRequest::RecordLap,
        }
    }
}

struct GuiInner {
    tx: Sender<AppRequest>,
    state: TimerState,
}

impl GuiInner {
    fn new(tx: Sender<AppRequest>) -> GuiInner {
        GuiInner {
            tx,
            state: TimerState::default(),
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::StateUpdated(state) => {
                self.state = state;
            }
        }
    }

    fn send_actions(&self, actions: Vec<StopwatchAction>) -> Result<()> {
        for action in actions {
            debug!("Sending {:?}", action);
            self.tx
                .send(action.into())
                .with_context(|| format!("Failed to send {:?} to app", action))?;
        }

        Ok(())
    }

    fn update(&mut self, ctx: &egui::Context) -> Result<()> {
        let mut actions = keyboard_actions(ctx);

        CentralPanel::default()
            .frame(Frame::none().fill(BACKGROUND).inner_margin(16.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(MAX_CONTENT_WIDTH);
                    render_header(ui);
                    ui.add_space(24.0);

                    card().show(ui, |ui| {
                        actions.extend(render_stopwatch(ui, &self.state));
                    });

                    if !self.state.laps().is_empty() {
                        ui.add_space(24.0);
                        card().show(ui, |ui| lap_list::show(ui, self.state.laps()));
                    }
                });
            });

        self.send_actions(actions)
    }
}

fn key_action(key: Key) -> Option<StopwatchAction> {
    match key {
        Key::S => Some(StopwatchAction::ToggleRunning),
        Key::R => Some(StopwatchAction::Reset),
        Key::L => Some(StopwatchAction::RecordLap),
        _ => None,
    }
}

/// Holding a key down produces repeats, only the initial press counts
fn actions_from_events(events: &[Event]) -> Vec<StopwatchAction> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => key_action(*key),
            _ => None,
        })
        .collect()
}

fn keyboard_actions(ctx: &egui::Context) -> Vec<StopwatchAction> {
    ctx.input(|i| actions_from_events(&i.events))
}

fn card() -> Frame {
    Frame::none()
        .fill(CARD_FILL)
        .stroke(Stroke::new(1.0, CARD_STROKE))
        .rounding(Rounding::same(12.0))
        .inner_margin(Margin::same(24.0))
}

fn render_header(ui: &mut Ui) {
    ui.label(
        RichText::new("Stopwatch")
            .size(36.0)
            .strong()
            .color(Color32::WHITE),
    );
    ui.label(RichText::new("Precision timing at your fingertips").color(SUBTITLE));
}

fn control_button(text: &str, fill: Color32) -> Button<'static> {
    Button::new(
        RichText::new(text.to_string())
            .size(18.0)
            .strong()
            .color(Color32::WHITE),
    )
    .fill(fill)
    .min_size(CONTROL_SIZE)
}

fn render_stopwatch(ui: &mut Ui, state: &TimerState) -> Vec<StopwatchAction> {
    let mut actions = Vec::new();

    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(format_elapsed(state.elapsed_ms()))
                .monospace()
                .size(56.0)
                .strong()
                .color(Color32::WHITE),
        );
        ui.add_space(24.0);

        // egui has no centered horizontal layout, pad to center the pair of buttons
        let row_width = CONTROL_SIZE.x * 2.0 + ui.spacing().item_spacing.x;
        ui.horizontal(|ui| {
            ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));

            let (label, fill) = if state.running() {
                ("Pause", PAUSE_RED)
            } else {
                ("Start", START_GREEN)
            };
            if ui.add(control_button(label, fill)).clicked() {
                actions.push(StopwatchAction::ToggleRunning);
            }

            if ui
                .add(control_button("Reset", Color32::from_white_alpha(26)))
                .clicked()
            {
                actions.push(StopwatchAction::Reset);
            }
        });
        ui.add_space(16.0);

        let lap_button = control_button("Lap", LAP_BLUE);
        if ui.add_enabled(state.can_record_lap(), lap_button).clicked() {
            actions.push(StopwatchAction::RecordLap);
        }
    });

    actions
}

fn lock_inner(inner: &Mutex<GuiInner>) -> MutexGuard<'_, GuiInner> {
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("Gui state lock poisoned, continuing with last state");
            poisoned.into_inner()
        }
    }
}

pub struct Gui {
    inner: Arc<Mutex<GuiInner>>,
}

impl Gui {
    pub fn new(tx: Sender<AppRequest>, rx: Receiver<AppEvent>, cc: &CreationContext<'_>) -> Gui {
        cc.egui_ctx.set_visuals(Visuals::dark());

        let inner = Arc::new(Mutex::new(GuiInner::new(tx)));

        // Events arrive while the window is idle, wake it up on every state change
        let event_inner = Arc::clone(&inner);
        let ctx = cc.egui_ctx.clone();
        std::thread::spawn(move || {
            while let Ok(event) = rx.recv() {
                lock_inner(&event_inner).handle_event(event);
                ctx.request_repaint();
            }
            debug!("App closed event channel");
        });

        Gui { inner }
    }
}

impl eframe::App for Gui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let res = lock_inner(&self.inner).update(ctx);

        if let Err(e) = res {
            error!("{:?}", e);
        }
    }
}

impl Drop for Gui {
    fn drop(&mut self) {
        if lock_inner(&self.inner)
            .tx
            .send(AppRequest::Shutdown)
            .is_err()
        {
            warn!("App already closed before gui shutdown");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::sync::mpsc;

    #[test]
    fn test_actions_map_to_requests() -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let inner = GuiInner::new(tx);
        inner.send_actions(vec![
            StopwatchAction::ToggleRunning,
            StopwatchAction::RecordLap,
            StopwatchAction::Reset,
        ])?;

        let sent = rx.try_iter().collect::<Vec<_>>();
        assert!(matches!(
            sent.as_slice(),
            [
                AppRequest::ToggleRunning,
                AppRequest::RecordLap,
                AppRequest::Reset
            ]
        ));
        Ok(())
    }

    #[test]
    fn test_send_fails_without_app() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let inner = GuiInner::new(tx);
        assert!(inner
            .send_actions(vec![StopwatchAction::ToggleRunning])
            .is_err());
    }

    fn key_event(key: Key, pressed: bool, repeat: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: Default::default(),
        }
    }

    #[test]
    fn test_held_keys_act_once() {
        let events = [
            key_event(Key::S, true, false),
            key_event(Key::S, true, true),
            key_event(Key::S, true, true),
            key_event(Key::S, false, false),
            key_event(Key::L, true, false),
            key_event(Key::L, true, true),
            key_event(Key::R, true, false),
            key_event(Key::X, true, false),
        ];

        assert_eq!(
            actions_from_events(&events),
            vec![
                StopwatchAction::ToggleRunning,
                StopwatchAction::RecordLap,
                StopwatchAction::Reset
            ]
        );
    }

    #[test]
    fn test_event_replaces_state() {
        let (tx, _rx) = mpsc::channel();
        let mut inner = GuiInner::new(tx);
        let state = TimerState {
            elapsed_ms: 1200,
            running: true,
            laps: vec![500, 1200],
        };
        inner.handle_event(AppEvent::StateUpdated(state.clone()));
        assert_eq!(inner.state, state);
    }
}
