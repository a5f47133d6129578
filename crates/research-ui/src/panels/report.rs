//! Rendered report — draws the parsed markdown block tree.

use egui::{self, RichText};

use crate::markdown::{Block, Span};
use crate::theme::*;

pub fn report_panel(ui: &mut egui::Ui, blocks: &[Block]) {
    for (index, block) in blocks.iter().enumerate() {
        draw_block(ui, index, block);
        ui.add_space(6.0);
    }
}

fn draw_block(ui: &mut egui::Ui, index: usize, block: &Block) {
    match block {
        Block::Heading { level, spans } => {
            if *level <= 2 {
                ui.add_space(6.0);
            }
            draw_inline(ui, spans, Some(heading_size(*level)), true);
        }
        Block::Paragraph(spans) => draw_inline(ui, spans, None, false),
        Block::CodeBlock { code, .. } => {
            egui::Frame::default()
                .fill(CODE_BG)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(code).color(CODE_FG).monospace());
                });
        }
        Block::List { ordered, items } => {
            for (i, item) in items.iter().enumerate() {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    let marker = if *ordered {
                        format!("{}. ", i + 1)
                    } else {
                        "• ".to_string()
                    };
                    ui.label(RichText::new(marker).color(TEXT_SECONDARY));
                    for span in item {
                        ui.label(span_text(span, None, false));
                    }
                });
            }
        }
        Block::Table { header, rows } => {
            egui::Grid::new(("report_table", index))
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    if !header.is_empty() {
                        for cell in header {
                            draw_inline(ui, cell, None, true);
                        }
                        ui.end_row();
                    }
                    for row in rows {
                        for cell in row {
                            draw_inline(ui, cell, None, false);
                        }
                        ui.end_row();
                    }
                });
        }
        Block::Rule => {
            ui.separator();
        }
    }
}

fn draw_inline(ui: &mut egui::Ui, spans: &[Span], size: Option<f32>, strong: bool) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            ui.label(span_text(span, size, strong));
        }
    });
}

fn span_text(span: &Span, size: Option<f32>, strong: bool) -> RichText {
    let mut text = RichText::new(&span.text).color(TEXT_PRIMARY);
    if let Some(size) = size {
        text = text.size(size);
    }
    if span.strong || strong {
        text = text.strong();
    }
    if span.emphasis {
        text = text.italics();
    }
    if span.code {
        text = text.monospace().color(CODE_FG).background_color(CODE_BG);
    }
    if span.strikethrough {
        text = text.strikethrough();
    }
    text
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 22.0,
        2 => 19.0,
        3 => 16.5,
        _ => 15.0,
    }
}
