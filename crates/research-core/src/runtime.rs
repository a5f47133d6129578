//! Async drivers that pump a transport into the event bus.
//!
//! Spawned via `wasm_bindgen_futures::spawn_local` from the composition
//! root; they never block the UI thread. Transport failures become
//! `RunFailed` events — nothing is thrown past this boundary, and no
//! retry happens here.

use futures::StreamExt;

use research_types::{event::SessionEvent, run::RunRequest, state::Checkpoint, ConsoleError};

use crate::event_bus::EventBus;
use crate::ports::{RunStreamEvent, ThreadTransport};

/// Drive one run to completion, creating the thread first if needed.
///
/// When the backend assigns a fresh thread id, `ThreadAssigned` is
/// emitted exactly once, before any run event. Stream events are
/// forwarded in emission order; live checkpoints synthesize
/// `<run_id>#<seq>` ids (the authoritative ids only exist in the
/// history endpoint).
pub async fn run_submission(
    transport: &dyn ThreadTransport,
    bus: &EventBus,
    thread_id: Option<String>,
    request: RunRequest,
) {
    let thread_id = match thread_id {
        Some(id) => id,
        None => match transport.create_thread().await {
            Ok(id) => {
                log::info!("Thread created: {}", id);
                bus.emit(SessionEvent::ThreadAssigned {
                    thread_id: id.clone(),
                });
                id
            }
            Err(e) => {
                bus.emit(SessionEvent::RunFailed {
                    error: error_value(&e),
                });
                bus.emit(SessionEvent::RunFinished);
                return;
            }
        },
    };

    let mut run_id = String::new();
    let mut seq = 0u32;
    let mut stream = transport.stream_run(&thread_id, &request);

    while let Some(event) = stream.next().await {
        match event {
            RunStreamEvent::Started { run_id: id } => {
                run_id = id.clone();
                bus.emit(SessionEvent::RunStarted { run_id: id });
            }
            RunStreamEvent::Values { state, interrupt } => {
                bus.emit(SessionEvent::ValuesUpdated { state, interrupt });
            }
            RunStreamEvent::Update { tasks } => {
                if tasks.is_empty() {
                    continue;
                }
                seq += 1;
                let id = if run_id.is_empty() {
                    format!("#{}", seq)
                } else {
                    format!("{}#{}", run_id, seq)
                };
                bus.emit(SessionEvent::CheckpointAdded {
                    checkpoint: Checkpoint::new(id, tasks),
                });
            }
            RunStreamEvent::Failed { error } => {
                bus.emit(SessionEvent::RunFailed { error });
            }
            RunStreamEvent::Done => break,
        }
    }

    bus.emit(SessionEvent::RunFinished);
}

/// Re-attach to an existing thread after a page load: replace the trace
/// with the recorded history, then surface the current snapshot.
pub async fn resume_thread(transport: &dyn ThreadTransport, bus: &EventBus, thread_id: &str) {
    match transport.fetch_history(thread_id).await {
        Ok(checkpoints) => {
            bus.emit(SessionEvent::HistoryLoaded { checkpoints });
        }
        Err(e) => {
            // A missing trace is not fatal; the snapshot may still load.
            log::warn!("History fetch failed for {}: {}", thread_id, e);
        }
    }

    match transport.fetch_state(thread_id).await {
        Ok(snapshot) => {
            bus.emit(SessionEvent::ValuesUpdated {
                state: snapshot.state,
                interrupt: snapshot.interrupt,
            });
        }
        Err(e) => {
            bus.emit(SessionEvent::RunFailed {
                error: error_value(&e),
            });
        }
    }
}

fn error_value(e: &ConsoleError) -> serde_json::Value {
    serde_json::json!({ "message": e.to_string() })
}
