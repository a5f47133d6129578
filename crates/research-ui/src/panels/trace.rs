//! Execution trace — a collapsible record of checkpoints and their
//! task results.
//!
//! Collapsed, the panel caps its height and clips overflow; a click
//! anywhere on it expands. Expanded, it scrolls naturally and only the
//! toggle control collapses it again.

use egui::scroll_area::ScrollBarVisibility;
use egui::{self, RichText, ScrollArea, Sense};

use research_types::state::Checkpoint;

use crate::state::UiState;
use crate::theme::*;

const COLLAPSED_HEIGHT: f32 = 140.0;
const EXPANDED_HEIGHT: f32 = 360.0;

pub fn trace_panel(ui: &mut egui::Ui, state: &mut UiState, history: &[Checkpoint]) {
    let expanded = state.trace_disclosure.is_expanded();
    let mut toggled = false;

    let inner = egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Execution trace")
                        .strong()
                        .color(TEXT_PRIMARY),
                );
                ui.label(
                    RichText::new(format!("{} steps", history.len()))
                        .small()
                        .color(TEXT_SECONDARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if expanded { "▾" } else { "▸" };
                    if ui.small_button(icon).clicked() {
                        toggled = true;
                    }
                });
            });
            ui.separator();

            if expanded {
                ScrollArea::vertical()
                    .max_height(EXPANDED_HEIGHT)
                    .auto_shrink([false, true])
                    .stick_to_bottom(true)
                    .show(ui, |ui| draw_entries(ui, history));
            } else {
                ScrollArea::vertical()
                    .max_height(COLLAPSED_HEIGHT)
                    .auto_shrink([false, true])
                    .enable_scrolling(false)
                    .scroll_bar_visibility(ScrollBarVisibility::AlwaysHidden)
                    .show(ui, |ui| draw_entries(ui, history));
            }
        });

    if toggled {
        state.trace_disclosure.on_toggle();
    } else if inner.response.interact(Sense::click()).clicked() {
        state.trace_disclosure.on_body_click();
    }
}

fn draw_entries(ui: &mut egui::Ui, history: &[Checkpoint]) {
    for checkpoint in history {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(short_id(&checkpoint.id))
                    .small()
                    .monospace()
                    .color(ACCENT),
            );
            ui.label(
                RichText::new(&checkpoint.created_at)
                    .small()
                    .color(TEXT_SECONDARY),
            );
        });
        for task in &checkpoint.tasks {
            ui.label(
                RichText::new(&task.name)
                    .small()
                    .strong()
                    .color(TEXT_PRIMARY),
            );
            ui.label(
                RichText::new(result_text(&task.result))
                    .small()
                    .monospace()
                    .color(TEXT_SECONDARY),
            );
        }
        ui.add_space(4.0);
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(12).collect()
}

/// String results render verbatim, anything else pretty-prints.
fn result_text(result: &serde_json::Value) -> String {
    match result {
        serde_json::Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
