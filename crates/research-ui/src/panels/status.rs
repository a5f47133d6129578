//! Topic status — the research headline and the section plan.

use egui::{self, RichText};

use research_types::state::ResearchState;

use crate::theme::*;

/// Render the topic line; idle sessions get the prompt invitation.
/// While a run is active the line carries a spinner.
pub fn status_panel(ui: &mut egui::Ui, state: &ResearchState, is_loading: bool) {
    if state.has_topic() {
        ui.horizontal(|ui| {
            if is_loading {
                ui.spinner();
                ui.label(RichText::new("Researching topic: ").color(TEXT_SECONDARY));
                ui.label(RichText::new(&state.topic).color(TEXT_PRIMARY));
            } else {
                ui.label(
                    RichText::new(format!("Research for topic: {}", state.topic))
                        .color(TEXT_PRIMARY),
                );
            }
        });
        if !state.sections.is_empty() {
            section_plan(ui, state);
        }
    } else {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Deep Research").strong().color(TEXT_PRIMARY));
            ui.label(RichText::new("Enter a topic to research").color(TEXT_SECONDARY));
        });
    }
}

/// The planned sections with completion markers.
fn section_plan(ui: &mut egui::Ui, state: &ResearchState) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.label(RichText::new("Planned sections").small().color(TEXT_SECONDARY));
            for section in &state.sections {
                let done = state.is_section_completed(&section.name);
                ui.horizontal(|ui| {
                    let (mark, color) = if done {
                        ("✔", SUCCESS)
                    } else {
                        ("○", TEXT_SECONDARY)
                    };
                    ui.label(RichText::new(mark).color(color));
                    ui.label(RichText::new(&section.name).color(TEXT_PRIMARY));
                    if section.research {
                        ui.label(RichText::new("research").small().color(ACCENT));
                    }
                });
                if !section.description.is_empty() {
                    ui.label(
                        RichText::new(&section.description)
                            .small()
                            .color(TEXT_SECONDARY),
                    );
                }
            }
        });
}
