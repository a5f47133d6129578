//! Interrupt response UI — one-click approval or a feedback dialog.

use egui::{self, Button, RichText, TextEdit};

use research_types::state::Interrupt;

use crate::state::UiState;
use crate::theme::*;

/// What the user decided. The caller turns this into a resume command.
#[derive(Debug, Clone, PartialEq)]
pub enum InterruptAction {
    Approve,
    Feedback(String),
}

/// Render the pending interrupt and its two response affordances.
/// Returns `Some` when the user resolved it.
pub fn interrupt_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    interrupt: &Interrupt,
) -> Option<InterruptAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .stroke(egui::Stroke::new(1.0, WARNING))
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.label(RichText::new("INTERRUPTED").small().strong().color(WARNING));
            ui.label(RichText::new(interrupt.text()).color(TEXT_PRIMARY));
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let approve = ui.add(
                    Button::new(RichText::new("Approve").color(TEXT_PRIMARY))
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING),
                );
                if approve.clicked() {
                    action = Some(InterruptAction::Approve);
                }
                if ui.button("Give feedback…").clicked() {
                    state.show_feedback_dialog = true;
                }
            });
        });

    if state.show_feedback_dialog {
        if let Some(feedback) = feedback_dialog(ui.ctx(), state) {
            action = Some(InterruptAction::Feedback(feedback));
        }
    }

    action
}

fn feedback_dialog(ctx: &egui::Context, state: &mut UiState) -> Option<String> {
    let mut submitted = None;
    let mut open = true;
    let mut close = false;

    egui::Window::new("Provide feedback")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add(
                TextEdit::multiline(&mut state.feedback_input)
                    .hint_text("Tell the agent what to change...")
                    .desired_rows(4)
                    .desired_width(320.0),
            );
            ui.horizontal(|ui| {
                let can_send = !state.feedback_input.trim().is_empty();
                if ui.add_enabled(can_send, Button::new("Send")).clicked() {
                    let text = state.feedback_input.trim().to_string();
                    state.feedback_input.clear();
                    close = true;
                    submitted = Some(text);
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });

    if !open || close {
        state.show_feedback_dialog = false;
    }
    submitted
}
