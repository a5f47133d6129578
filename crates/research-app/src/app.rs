//! Main egui application — composes the page and owns the session
//! wiring.
//!
//! The page is a pure projection of the session client's snapshot plus
//! the UI-local state; visible regions are independent predicates over
//! that snapshot (a report can render while a later step still runs,
//! an error never suppresses the rest).

use std::rc::Rc;

use egui::{self, CentralPanel, RichText, ScrollArea, TopBottomPanel};
use serde_json::Value;

use research_core::event_bus::EventBus;
use research_core::ports::{ThreadParamPort, ThreadTransport};
use research_core::runtime::{resume_thread, run_submission};
use research_core::session::SessionClient;
use research_platform::langgraph::LangGraphTransport;
use research_platform::thread_param::UrlThreadParam;
use research_types::config::ServiceConfig;
use research_types::event::SessionEvent;
use research_types::run::{ResumeValue, Submission};
use research_ui::panels::composer::{self, ComposerAction};
use research_ui::panels::interrupt::{self, InterruptAction};
use research_ui::panels::{report, status, trace};
use research_ui::state::UiState;
use research_ui::theme;

/// The main application state
pub struct ResearchApp {
    ui_state: UiState,
    client: SessionClient,
    bus: EventBus,
    transport: Rc<dyn ThreadTransport>,
    thread_param: Rc<dyn ThreadParamPort>,
    first_frame: bool,
}

impl ResearchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ServiceConfig::default();
        let bus = EventBus::new();
        let thread_param: Rc<dyn ThreadParamPort> =
            Rc::new(UrlThreadParam::new(&config.thread_param));
        let transport: Rc<dyn ThreadTransport> = Rc::new(LangGraphTransport::new(config));

        let thread_id = thread_param.get();
        let client = SessionClient::attach(thread_id.clone());

        let app = Self {
            ui_state: UiState::new(),
            client,
            bus,
            transport,
            thread_param,
            first_frame: true,
        };

        // A reload with a thread in the URL resumes that session
        if let Some(id) = thread_id {
            log::info!("Re-attaching to thread {}", id);
            app.dispatch_resume(id);
        }

        app
    }

    fn dispatch_resume(&self, thread_id: String) {
        let transport = self.transport.clone();
        let bus = self.bus.clone();
        wasm_bindgen_futures::spawn_local(async move {
            resume_thread(transport.as_ref(), &bus, &thread_id).await;
        });
    }

    fn dispatch_submission(&mut self, submission: Submission, ctx: &egui::Context) {
        let request = self.client.begin_submit(submission);
        let thread_id = self.client.thread_id().map(str::to_string);
        let transport = self.transport.clone();
        let bus = self.bus.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            run_submission(transport.as_ref(), &bus, thread_id, request).await;
            ctx.request_repaint();
        });
    }

    /// Stop waiting locally, then ask the backend to cancel. The
    /// displayed partial state stays frozen either way.
    fn dispatch_stop(&mut self, ctx: &egui::Context) {
        self.client.stop();
        let Some(thread_id) = self.client.thread_id().map(str::to_string) else {
            return;
        };
        let transport = self.transport.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = transport.cancel_run(&thread_id).await {
                log::warn!("Cancellation failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn start_new_thread(&mut self) {
        self.thread_param.set(None);
        self.client.reset();
        self.ui_state.reset();
    }

    // ─── Page regions ────────────────────────────────────────

    fn header(&mut self, ctx: &egui::Context) {
        let thread_id = self.client.thread_id().map(str::to_string);
        let mut new_thread = false;

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Deep Research")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                if let Some(id) = &thread_id {
                    ui.separator();
                    ui.label(RichText::new("Thread").color(theme::TEXT_SECONDARY));
                    ui.label(
                        RichText::new(id)
                            .monospace()
                            .small()
                            .color(theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("New Thread").clicked() {
                            new_thread = true;
                        }
                    });
                }
            });
        });

        if new_thread {
            self.start_new_thread();
        }
    }

    fn footer(&mut self, ctx: &egui::Context) {
        let is_loading = self.client.is_loading();
        let mut action = None;

        TopBottomPanel::bottom("composer").show(ctx, |ui| {
            ui.add_space(4.0);
            action = composer::composer_panel(ui, &mut self.ui_state, is_loading);
            ui.add_space(4.0);
        });

        match action {
            Some(ComposerAction::Submit(topic)) => {
                self.dispatch_submission(Submission::topic(topic), ctx);
            }
            Some(ComposerAction::Stop) => self.dispatch_stop(ctx),
            None => {}
        }
    }

    fn body(&mut self, ctx: &egui::Context) {
        let is_loading = self.client.is_loading();
        let values = self.client.values().clone();
        let error = self.client.error().cloned();
        let interrupt = self.client.interrupt().cloned();
        let mut interrupt_action = None;

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    status::status_panel(ui, &values, is_loading);

                    if !self.client.history().is_empty() {
                        trace::trace_panel(ui, &mut self.ui_state, self.client.history());
                    }

                    if values.has_report() {
                        let blocks = self.ui_state.report_blocks(&values.final_report);
                        report::report_panel(ui, blocks);
                    }

                    if let Some(error) = &error {
                        ui.label(RichText::new(raw_error(error)).color(theme::ERROR));
                    }

                    if let Some(interrupt) = &interrupt {
                        interrupt_action =
                            interrupt::interrupt_panel(ui, &mut self.ui_state, interrupt);
                    }
                });
        });

        if let Some(action) = interrupt_action {
            let resume = match action {
                InterruptAction::Approve => ResumeValue::approve(),
                InterruptAction::Feedback(text) => ResumeValue::feedback(text),
            };
            self.dispatch_submission(Submission::resume(resume), ctx);
        }
    }
}

impl eframe::App for ResearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain backend events gathered since the last frame
        let events = self.bus.drain();
        if !events.is_empty() {
            for event in &events {
                if let SessionEvent::ThreadAssigned { thread_id } = event {
                    self.thread_param.set(Some(thread_id));
                }
            }
            self.client.process_events(events);
            ctx.request_repaint();
        }

        if self.client.is_loading() {
            ctx.request_repaint();
        }

        self.header(ctx);
        self.footer(ctx);
        self.body(ctx);
    }
}

/// Errors display raw, exactly as the backend reported them.
fn raw_error(error: &Value) -> String {
    serde_json::to_string(error).unwrap_or_else(|_| error.to_string())
}
