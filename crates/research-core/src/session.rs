//! The streaming session client — the one mutable source of truth the
//! view projects from.
//!
//! Holds the latest merged snapshot, the loading flag, the last error,
//! the pending interrupt and the checkpoint trace for one thread.
//! Everything mutates through two doors: `begin_submit`/`stop` for user
//! actions, `process_events` for backend events drained off the bus.

use serde_json::Value;

use research_types::{
    event::SessionEvent,
    run::{RunRequest, Submission},
    state::{Checkpoint, Interrupt, ResearchState},
};

pub struct SessionClient {
    thread_id: Option<String>,
    run_id: Option<String>,
    values: ResearchState,
    is_loading: bool,
    error: Option<Value>,
    interrupt: Option<Interrupt>,
    history: Vec<Checkpoint>,
}

impl SessionClient {
    pub fn new() -> Self {
        Self {
            thread_id: None,
            run_id: None,
            values: ResearchState::default(),
            is_loading: false,
            error: None,
            interrupt: None,
            history: Vec::new(),
        }
    }

    /// Client for a thread that may already exist (id recovered from the
    /// page address). With `None` it stays idle until a submission
    /// creates one.
    pub fn attach(thread_id: Option<String>) -> Self {
        let mut client = Self::new();
        client.thread_id = thread_id;
        client
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    /// Latest merged snapshot.
    pub fn values(&self) -> &ResearchState {
        &self.values
    }

    /// True while a run is active (between submit and
    /// completion/error/stop).
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Last transport or execution error, verbatim. Cleared on the next
    /// submit.
    pub fn error(&self) -> Option<&Value> {
        self.error.as_ref()
    }

    /// Pending interrupt, if the backend paused for human input.
    pub fn interrupt(&self) -> Option<&Interrupt> {
        self.interrupt.as_ref()
    }

    /// Checkpoint trace, oldest first. Grows monotonically during a run.
    pub fn history(&self) -> &[Checkpoint] {
        &self.history
    }

    /// Turn a user action into a transport request. Applies the
    /// optimistic patch immediately, clears the previous error and flips
    /// the loading flag; the pending interrupt (if any) stays visible
    /// until the backend confirms the resume through a fresh snapshot.
    pub fn begin_submit(&mut self, submission: Submission) -> RunRequest {
        if let Some(update) = &submission.optimistic {
            self.values.apply(update);
        }
        self.error = None;
        self.is_loading = true;
        RunRequest {
            input: submission.input,
            command: submission.command,
        }
    }

    /// Stop waiting on the in-flight run. The displayed partial state is
    /// frozen as-is; nothing rolls back. Backend cancellation is
    /// requested separately and is best-effort.
    pub fn stop(&mut self) {
        self.is_loading = false;
    }

    /// Back to a fresh session: everything cleared, no thread.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply backend events in drain order.
    pub fn process_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::ThreadAssigned { thread_id } => {
                    self.thread_id = Some(thread_id);
                }
                SessionEvent::RunStarted { run_id } => {
                    self.run_id = Some(run_id);
                }
                SessionEvent::ValuesUpdated { state, interrupt } => {
                    self.values = state;
                    self.interrupt = interrupt;
                }
                SessionEvent::CheckpointAdded { checkpoint } => {
                    self.history.push(checkpoint);
                }
                SessionEvent::HistoryLoaded { checkpoints } => {
                    self.history = checkpoints;
                }
                SessionEvent::RunFailed { error } => {
                    self.error = Some(error);
                    self.is_loading = false;
                }
                SessionEvent::RunFinished => {
                    self.is_loading = false;
                }
            }
        }
    }
}

impl Default for SessionClient {
    fn default() -> Self {
        Self::new()
    }
}
