//! WASM-target tests for research-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use serde_json::json;

use research_types::config::*;
use research_types::error::*;
use research_types::event::*;
use research_types::run::*;
use research_types::state::*;

// ─── Snapshot Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn state_default_is_empty() {
    let state = ResearchState::default();
    assert!(!state.has_topic());
    assert!(!state.has_report());
}

#[wasm_bindgen_test]
fn state_deserialize_tolerates_missing_fields() {
    let state: ResearchState = serde_json::from_value(json!({ "topic": "t" })).unwrap();
    assert_eq!(state.topic, "t");
    assert!(state.final_report.is_empty());
}

#[wasm_bindgen_test]
fn state_optimistic_apply() {
    let mut state = ResearchState::default();
    state.apply(&StateUpdate {
        topic: Some("fusion".to_string()),
    });
    assert_eq!(state.topic, "fusion");
}

#[wasm_bindgen_test]
fn interrupt_text_projection() {
    assert_eq!(Interrupt::new(json!("review")).text(), "review");
    assert!(Interrupt::new(json!({ "q": 1 })).text().contains("q"));
}

// ─── Wire Shape Tests ────────────────────────────────────

#[wasm_bindgen_test]
fn resume_approve_wire_shape() {
    let request = RunRequest {
        input: None,
        command: Some(RunCommand {
            resume: ResumeValue::approve(),
        }),
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, json!({ "command": { "resume": true } }));
}

#[wasm_bindgen_test]
fn resume_feedback_wire_shape() {
    let request = RunRequest {
        input: None,
        command: Some(RunCommand {
            resume: ResumeValue::feedback("looks good"),
        }),
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, json!({ "command": { "resume": "looks good" } }));
}

#[wasm_bindgen_test]
fn topic_submission_wire_shape() {
    let submission = Submission::topic("quantum batteries");
    assert_eq!(submission.input, Some(json!({ "topic": "quantum batteries" })));
    assert!(submission.command.is_none());
}

// ─── Event Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn session_event_roundtrip() {
    let event = SessionEvent::RunStarted {
        run_id: "r-1".to_string(),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: SessionEvent = serde_json::from_str(&json).unwrap();
    assert!(matches!(back, SessionEvent::RunStarted { run_id } if run_id == "r-1"));
}

// ─── Config / Error Tests ────────────────────────────────

#[wasm_bindgen_test]
fn default_config() {
    let config = ServiceConfig::default();
    assert_eq!(config.thread_param, "threadId");
    assert!(!config.api_url.is_empty());
}

#[wasm_bindgen_test]
fn error_display() {
    assert_eq!(
        ConsoleError::Network("down".to_string()).to_string(),
        "Network error: down"
    );
}
