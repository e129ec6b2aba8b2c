use crate::format::format_elapsed;

use eframe::egui::{Align, Color32, Frame, Layout, RichText, Rounding, ScrollArea, Stroke, Ui};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LapEntry {
    /// 1 based, in recording order
    pub(crate) number: usize,
    pub(crate) elapsed_ms: u64,
    pub(crate) is_latest: bool,
}

pub(crate) fn lap_entries(laps: &[u64]) -> Vec<LapEntry> {
    let last = laps.len().saturating_sub(1);
    laps.iter()
        .enumerate()
        .map(|(i, elapsed_ms)| LapEntry {
            number: i + 1,
            elapsed_ms: *elapsed_ms,
            is_latest: i == last,
        })
        .collect()
}

const MAX_LIST_HEIGHT: f32 = 256.0;

pub(crate) fn show(ui: &mut Ui, laps: &[u64]) {
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Lap Times")
                .size(20.0)
                .strong()
                .color(Color32::WHITE),
        );
    });
    ui.add_space(12.0);

    ScrollArea::vertical()
        .id_source("lap_list")
        .max_height(MAX_LIST_HEIGHT)
        .auto_shrink([false, true])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in lap_entries(laps) {
                render_lap(ui, &entry);
                ui.add_space(6.0);
            }
        });
}

fn render_lap(ui: &mut Ui, entry: &LapEntry) {
    let (fill, stroke) = if entry.is_latest {
        (
            Color32::from_rgba_unmultiplied(59, 130, 246, 77),
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(96, 165, 250, 128)),
        )
    } else {
        (
            Color32::from_rgba_unmultiplied(255, 255, 255, 13),
            Stroke::NONE,
        )
    };

    Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(Rounding::same(8.0))
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Lap {}", entry.number))
                        .color(Color32::from_rgb(203, 213, 225)),
                );
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(format_elapsed(entry.elapsed_ms))
                            .monospace()
                            .size(18.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                });
            });
        });
}
