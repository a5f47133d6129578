//! WASM-target tests for research-core.
//!
//! Runs EventBus, SessionClient and runtime-driver tests under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use std::cell::RefCell;
use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::{self, Stream};
use serde_json::json;

use research_core::event_bus::EventBus;
use research_core::ports::{RunStreamEvent, ThreadSnapshot, ThreadTransport};
use research_core::runtime::run_submission;
use research_core::session::SessionClient;
use research_types::event::SessionEvent;
use research_types::run::{RunRequest, Submission};
use research_types::state::{Checkpoint, Interrupt, ResearchState};

fn snapshot(topic: &str, report: &str) -> ResearchState {
    ResearchState {
        topic: topic.to_string(),
        final_report: report.to_string(),
        ..Default::default()
    }
}

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_new_is_empty() {
    let bus = EventBus::new();
    assert!(!bus.has_pending());
    assert!(bus.drain().is_empty());
}

#[wasm_bindgen_test]
fn event_bus_preserves_order() {
    let bus = EventBus::new();
    bus.emit(SessionEvent::RunStarted {
        run_id: "r1".to_string(),
    });
    bus.emit(SessionEvent::RunFinished);

    let events = bus.drain();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], SessionEvent::RunStarted { .. }));
    assert!(matches!(events[1], SessionEvent::RunFinished));
}

#[wasm_bindgen_test]
fn event_bus_clone_shares_state() {
    let bus1 = EventBus::new();
    let bus2 = bus1.clone();
    bus1.emit(SessionEvent::RunFinished);
    assert!(bus2.has_pending());
    assert_eq!(bus2.drain().len(), 1);
}

// ─── SessionClient Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn client_optimistic_then_authoritative() {
    let mut client = SessionClient::new();
    client.begin_submit(Submission::topic("my guess"));
    assert_eq!(client.values().topic, "my guess");
    assert!(client.is_loading());

    client.process_events(vec![SessionEvent::ValuesUpdated {
        state: snapshot("authoritative", ""),
        interrupt: None,
    }]);
    assert_eq!(client.values().topic, "authoritative");
}

#[wasm_bindgen_test]
fn client_stop_freezes_partial_state() {
    let mut client = SessionClient::new();
    client.begin_submit(Submission::topic("t"));
    client.process_events(vec![SessionEvent::ValuesUpdated {
        state: snapshot("t", "# Partial"),
        interrupt: None,
    }]);

    client.stop();
    assert!(!client.is_loading());
    assert_eq!(client.values().final_report, "# Partial");
}

#[wasm_bindgen_test]
fn client_interrupt_presence() {
    let mut client = SessionClient::new();
    client.process_events(vec![SessionEvent::ValuesUpdated {
        state: snapshot("t", ""),
        interrupt: Some(Interrupt::new(json!("Review"))),
    }]);
    assert!(client.interrupt().is_some());

    client.process_events(vec![SessionEvent::ValuesUpdated {
        state: snapshot("t", ""),
        interrupt: None,
    }]);
    assert!(client.interrupt().is_none());
}

// ─── Runtime Driver Tests ────────────────────────────────

struct MockTransport {
    create_count: RefCell<u32>,
    stream_events: RefCell<Vec<RunStreamEvent>>,
}

#[async_trait(?Send)]
impl ThreadTransport for MockTransport {
    async fn create_thread(&self) -> research_types::Result<String> {
        *self.create_count.borrow_mut() += 1;
        Ok("thread-1".to_string())
    }

    fn stream_run(
        &self,
        _thread_id: &str,
        _request: &RunRequest,
    ) -> Pin<Box<dyn Stream<Item = RunStreamEvent>>> {
        let events: Vec<_> = self.stream_events.borrow_mut().drain(..).collect();
        Box::pin(stream::iter(events))
    }

    async fn cancel_run(&self, _thread_id: &str) -> research_types::Result<()> {
        Ok(())
    }

    async fn fetch_state(&self, _thread_id: &str) -> research_types::Result<ThreadSnapshot> {
        Ok(ThreadSnapshot::default())
    }

    async fn fetch_history(&self, _thread_id: &str) -> research_types::Result<Vec<Checkpoint>> {
        Ok(Vec::new())
    }
}

#[wasm_bindgen_test]
async fn run_submission_assigns_thread_once() {
    let transport = MockTransport {
        create_count: RefCell::new(0),
        stream_events: RefCell::new(vec![
            RunStreamEvent::Values {
                state: snapshot("t", "# Report"),
                interrupt: None,
            },
            RunStreamEvent::Done,
        ]),
    };
    let bus = EventBus::new();

    run_submission(&transport, &bus, None, RunRequest::default()).await;

    assert_eq!(*transport.create_count.borrow(), 1);

    let mut client = SessionClient::new();
    client.begin_submit(Submission::topic("t"));
    client.process_events(bus.drain());

    assert_eq!(client.thread_id(), Some("thread-1"));
    assert_eq!(client.values().final_report, "# Report");
    assert!(!client.is_loading());
}
