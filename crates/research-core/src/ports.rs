//! Port traits — the boundary between the session core and the browser.
//!
//! These traits are defined here in `research-core` (pure Rust).
//! Implementations live in `research-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.
//! Any transport honoring the contract — mock or real — is substitutable,
//! which is how the session client is tested without a live backend.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use research_types::{
    state::{Checkpoint, Interrupt, ResearchState, TaskResult},
    run::RunRequest,
    Result,
};

// ─── Thread Transport ────────────────────────────────────────

/// Event yielded by a transport while a run streams.
#[derive(Debug, Clone)]
pub enum RunStreamEvent {
    /// The backend accepted the run and announced its id
    Started { run_id: String },
    /// Full state snapshot, with the pending interrupt if any
    Values {
        state: ResearchState,
        interrupt: Option<Interrupt>,
    },
    /// Task results of one finished step
    Update { tasks: Vec<TaskResult> },
    /// Backend or transport failure, verbatim
    Failed { error: serde_json::Value },
    /// Stream closed normally
    Done,
}

/// What an existing thread looks like when re-attached.
#[derive(Debug, Clone, Default)]
pub struct ThreadSnapshot {
    pub state: ResearchState,
    pub interrupt: Option<Interrupt>,
}

#[async_trait(?Send)]
pub trait ThreadTransport {
    /// Create a new thread. The backend assigns the id.
    async fn create_thread(&self) -> Result<String>;

    /// Open a streaming run on a thread. Events arrive in backend
    /// emission order.
    fn stream_run(
        &self,
        thread_id: &str,
        request: &RunRequest,
    ) -> Pin<Box<dyn Stream<Item = RunStreamEvent>>>;

    /// Request best-effort cancellation of the in-flight run.
    async fn cancel_run(&self, thread_id: &str) -> Result<()>;

    /// Current state of an existing thread.
    async fn fetch_state(&self, thread_id: &str) -> Result<ThreadSnapshot>;

    /// Past checkpoints of an existing thread, oldest first.
    async fn fetch_history(&self, thread_id: &str) -> Result<Vec<Checkpoint>>;
}

// ─── Thread Parameter Store ──────────────────────────────────

/// Where the session id lives between page loads. The browser
/// implementation round-trips a URL query parameter; no id format
/// validation happens on this side.
pub trait ThreadParamPort {
    fn get(&self) -> Option<String>;

    /// `Some` mirrors a backend-assigned id into the page address;
    /// `None` clears it, signaling a fresh session.
    fn set(&self, id: Option<&str>);
}
