//! Agent-service transport — speaks the LangGraph Platform REST + SSE
//! protocol.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility. Run
//! streams are read chunk by chunk from the response ReadableStream,
//! reassembled into SSE records, and bridged to a futures channel so
//! the core sees an ordered `Stream` of run events.

use std::cell::RefCell;
use std::pin::Pin;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::stream::Stream;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::ReadableStreamDefaultReader;

use research_core::ports::{RunStreamEvent, ThreadSnapshot, ThreadTransport};
use research_types::{
    config::ServiceConfig,
    run::RunRequest,
    state::{Checkpoint, Interrupt, ResearchState, TaskResult},
    ConsoleError, Result,
};

use crate::sse::{SseMessage, SseParser};

/// Transport for a LangGraph-style agent service.
pub struct LangGraphTransport {
    config: ServiceConfig,
    /// Run id announced by the most recently opened stream; cancellation
    /// targets it.
    active_run: Rc<RefCell<Option<String>>>,
}

impl LangGraphTransport {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            active_run: Rc::new(RefCell::new(None)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }
}

#[async_trait(?Send)]
impl ThreadTransport for LangGraphTransport {
    async fn create_thread(&self) -> Result<String> {
        let response = Request::post(&self.url("/threads"))
            .header("Content-Type", "application/json")
            .json(&json!({}))
            .map_err(|e| ConsoleError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ConsoleError::Thread(format!("HTTP {}", response.status())));
        }

        let created: ThreadCreated = response
            .json()
            .await
            .map_err(|e| ConsoleError::Protocol(e.to_string()))?;
        Ok(created.thread_id)
    }

    fn stream_run(
        &self,
        thread_id: &str,
        request: &RunRequest,
    ) -> Pin<Box<dyn Stream<Item = RunStreamEvent>>> {
        let url = self.url(&format!("/threads/{}/runs/stream", thread_id));
        let body = stream_body(&self.config.assistant_id, request);
        let active_run = self.active_run.clone();
        active_run.borrow_mut().take();

        let (tx, rx) = mpsc::unbounded();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = pump_stream(&url, body, &tx, &active_run).await {
                log::error!("Run stream failed: {}", e);
                let _ = tx.unbounded_send(RunStreamEvent::Failed {
                    error: json!({ "message": e.to_string() }),
                });
                let _ = tx.unbounded_send(RunStreamEvent::Done);
            }
        });

        Box::pin(rx)
    }

    async fn cancel_run(&self, thread_id: &str) -> Result<()> {
        let run_id = self
            .active_run
            .borrow()
            .clone()
            .ok_or_else(|| ConsoleError::Thread("No active run to cancel".to_string()))?;

        let response = Request::post(&self.url(&format!(
            "/threads/{}/runs/{}/cancel",
            thread_id, run_id
        )))
        .send()
        .await
        .map_err(|e| ConsoleError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ConsoleError::Thread(format!("HTTP {}", response.status())));
        }
        log::info!("Cancellation requested for run {}", run_id);
        Ok(())
    }

    async fn fetch_state(&self, thread_id: &str) -> Result<ThreadSnapshot> {
        let response = Request::get(&self.url(&format!("/threads/{}/state", thread_id)))
            .send()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ConsoleError::Thread(format!("HTTP {}", response.status())));
        }

        let wire: ThreadStateWire = response
            .json()
            .await
            .map_err(|e| ConsoleError::Protocol(e.to_string()))?;
        Ok(thread_snapshot(wire))
    }

    async fn fetch_history(&self, thread_id: &str) -> Result<Vec<Checkpoint>> {
        let response = Request::post(&self.url(&format!("/threads/{}/history", thread_id)))
            .header("Content-Type", "application/json")
            .json(&json!({ "limit": self.config.history_limit }))
            .map_err(|e| ConsoleError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ConsoleError::Thread(format!("HTTP {}", response.status())));
        }

        let entries: Vec<HistoryEntryWire> = response
            .json()
            .await
            .map_err(|e| ConsoleError::Protocol(e.to_string()))?;
        Ok(history_checkpoints(entries))
    }
}

// ─── Streaming ───────────────────────────────────────────────

fn stream_body(assistant_id: &str, request: &RunRequest) -> Value {
    let mut body = match serde_json::to_value(request) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    body.insert(
        "assistant_id".to_string(),
        Value::String(assistant_id.to_string()),
    );
    body.insert("stream_mode".to_string(), json!(["values", "updates"]));
    Value::Object(body)
}

async fn pump_stream(
    url: &str,
    body: Value,
    tx: &mpsc::UnboundedSender<RunStreamEvent>,
    active_run: &Rc<RefCell<Option<String>>>,
) -> Result<()> {
    let response = Request::post(url)
        .header("Content-Type", "application/json")
        .header("Accept", "text/event-stream")
        .json(&body)
        .map_err(|e| ConsoleError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ConsoleError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(ConsoleError::Network(format!("HTTP {}: {}", status, text)));
    }

    let raw = response
        .body()
        .ok_or_else(|| ConsoleError::Protocol("Response has no body".to_string()))?;
    let reader: ReadableStreamDefaultReader = raw
        .get_reader()
        .dyn_into()
        .map_err(|_| ConsoleError::JsInterop("ReadableStream reader unavailable".to_string()))?;

    let mut parser = SseParser::new();
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| ConsoleError::JsInterop(format!("{:?}", e)))?;

        let done = js_sys::Reflect::get(&chunk, &"done".into())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }

        let value = js_sys::Reflect::get(&chunk, &"value".into())
            .map_err(|e| ConsoleError::JsInterop(format!("{:?}", e)))?;
        let bytes = js_sys::Uint8Array::new(&value).to_vec();
        let text = String::from_utf8_lossy(&bytes);

        for message in parser.feed(&text) {
            for event in decode_message(&message) {
                if let RunStreamEvent::Started { run_id } = &event {
                    *active_run.borrow_mut() = Some(run_id.clone());
                }
                // Receiver dropped means the page moved on; stop reading.
                if tx.unbounded_send(event).is_err() {
                    return Ok(());
                }
            }
        }
    }

    let _ = tx.unbounded_send(RunStreamEvent::Done);
    Ok(())
}

// ─── Event decoding ──────────────────────────────────────────

pub(crate) fn decode_message(message: &SseMessage) -> Vec<RunStreamEvent> {
    match message.event.as_str() {
        "metadata" => {
            let value: Value = serde_json::from_str(&message.data).unwrap_or(Value::Null);
            match value["run_id"].as_str() {
                Some(run_id) => vec![RunStreamEvent::Started {
                    run_id: run_id.to_string(),
                }],
                None => Vec::new(),
            }
        }
        "values" => {
            let value: Value = serde_json::from_str(&message.data).unwrap_or(Value::Null);
            vec![values_event(value)]
        }
        "updates" => {
            let tasks = update_tasks(&message.data);
            if tasks.is_empty() {
                Vec::new()
            } else {
                vec![RunStreamEvent::Update { tasks }]
            }
        }
        "error" => {
            let error: Value = serde_json::from_str(&message.data)
                .unwrap_or_else(|_| Value::String(message.data.clone()));
            vec![RunStreamEvent::Failed { error }]
        }
        "end" => vec![RunStreamEvent::Done],
        // heartbeats and stream modes we did not ask for
        _ => Vec::new(),
    }
}

/// A `values` record is the full snapshot; the service attaches pending
/// interrupts under the `__interrupt__` key.
fn values_event(mut value: Value) -> RunStreamEvent {
    let interrupt = value
        .as_object_mut()
        .and_then(|map| map.remove("__interrupt__"))
        .and_then(first_interrupt);
    let state: ResearchState = serde_json::from_value(value).unwrap_or_default();
    RunStreamEvent::Values { state, interrupt }
}

/// The interrupt key carries a list of pending interrupts; the first one
/// is what the user responds to.
fn first_interrupt(raw: Value) -> Option<Interrupt> {
    match raw {
        Value::Array(items) => items.into_iter().next().map(|item| {
            let value = item.get("value").cloned().unwrap_or(item);
            Interrupt::new(value)
        }),
        Value::Null => None,
        other => Some(Interrupt::new(other)),
    }
}

/// An `updates` record maps node names to their results.
fn update_tasks(data: &str) -> Vec<TaskResult> {
    let value: Value = serde_json::from_str(data).unwrap_or(Value::Null);
    match value {
        Value::Object(map) => map
            .into_iter()
            .filter(|(name, _)| name != "__interrupt__")
            .map(|(name, result)| TaskResult { name, result })
            .collect(),
        _ => Vec::new(),
    }
}

// ─── Wire shapes ─────────────────────────────────────────────

#[derive(Deserialize)]
struct ThreadCreated {
    thread_id: String,
}

#[derive(Deserialize, Default)]
pub(crate) struct ThreadStateWire {
    #[serde(default)]
    pub(crate) values: Value,
    #[serde(default)]
    pub(crate) tasks: Vec<TaskWire>,
}

#[derive(Deserialize, Default)]
pub(crate) struct TaskWire {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) interrupts: Vec<Value>,
    #[serde(default)]
    pub(crate) result: Option<Value>,
}

#[derive(Deserialize, Default)]
pub(crate) struct HistoryEntryWire {
    #[serde(default)]
    pub(crate) checkpoint: CheckpointRef,
    #[serde(default)]
    pub(crate) created_at: String,
    #[serde(default)]
    pub(crate) tasks: Vec<TaskWire>,
}

#[derive(Deserialize, Default)]
pub(crate) struct CheckpointRef {
    #[serde(default)]
    pub(crate) checkpoint_id: String,
}

pub(crate) fn thread_snapshot(wire: ThreadStateWire) -> ThreadSnapshot {
    let state: ResearchState = serde_json::from_value(wire.values).unwrap_or_default();
    let interrupt = wire
        .tasks
        .into_iter()
        .flat_map(|task| task.interrupts)
        .next()
        .map(|raw| {
            let value = raw.get("value").cloned().unwrap_or(raw);
            Interrupt::new(value)
        });
    ThreadSnapshot { state, interrupt }
}

/// The history endpoint returns snapshots newest first; the trace wants
/// finished steps oldest first.
pub(crate) fn history_checkpoints(entries: Vec<HistoryEntryWire>) -> Vec<Checkpoint> {
    let mut checkpoints: Vec<Checkpoint> = entries
        .into_iter()
        .filter_map(|entry| {
            let tasks: Vec<TaskResult> = entry
                .tasks
                .into_iter()
                .filter_map(|task| {
                    task.result.map(|result| TaskResult {
                        name: task.name,
                        result,
                    })
                })
                .collect();
            if tasks.is_empty() {
                return None;
            }
            Some(Checkpoint {
                id: entry.checkpoint.checkpoint_id,
                created_at: entry.created_at,
                tasks,
            })
        })
        .collect();
    checkpoints.reverse();
    checkpoints
}
