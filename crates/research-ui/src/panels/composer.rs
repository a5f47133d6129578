//! Topic composer — the footer form with its submit/stop toggle.

use egui::{self, Button, RichText, TextEdit, Vec2};

use crate::state::UiState;
use crate::theme::*;

#[derive(Debug, Clone, PartialEq)]
pub enum ComposerAction {
    Submit(String),
    Stop,
}

/// Render the topic form. The input is disabled and the submit control
/// becomes a stop control while a run is active.
pub fn composer_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    is_loading: bool,
) -> Option<ComposerAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .stroke(egui::Stroke::new(1.0, BORDER))
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            let input = TextEdit::singleline(&mut state.topic_input)
                .hint_text("Specify a topic...")
                .frame(false)
                .desired_width(f32::INFINITY)
                .font(egui::FontId::proportional(14.0));
            let response = ui.add_enabled(!is_loading, input);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if is_loading {
                    let stop = ui.add(
                        Button::new(RichText::new("Stop").color(TEXT_PRIMARY))
                            .fill(BG_SURFACE)
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(64.0, 0.0)),
                    );
                    if stop.clicked() {
                        action = Some(ComposerAction::Stop);
                    }
                } else {
                    let can_submit = !state.topic_input.trim().is_empty();
                    let submit = ui.add_enabled(
                        can_submit,
                        Button::new(RichText::new("Submit").color(TEXT_PRIMARY))
                            .fill(if can_submit { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(64.0, 0.0)),
                    );
                    let entered =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (submit.clicked() || entered) && can_submit {
                        let topic = state.topic_input.trim().to_string();
                        state.topic_input.clear();
                        action = Some(ComposerAction::Submit(topic));
                        response.request_focus();
                    }
                }
            });
        });

    action
}
