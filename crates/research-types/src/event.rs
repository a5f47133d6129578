use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{Checkpoint, Interrupt, ResearchState};

/// Events applied to the session client, in backend emission order.
/// The UI drains these once per frame; it never reorders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The backend assigned an id to a freshly created thread
    ThreadAssigned { thread_id: String },

    /// A run was accepted and has started streaming
    RunStarted { run_id: String },

    /// Full state snapshot, carrying the pending interrupt if any
    ValuesUpdated {
        state: ResearchState,
        interrupt: Option<Interrupt>,
    },

    /// A step finished; its task results form a checkpoint
    CheckpointAdded { checkpoint: Checkpoint },

    /// Past checkpoints of a re-attached thread, oldest first.
    /// Replaces the trace wholesale.
    HistoryLoaded { checkpoints: Vec<Checkpoint> },

    /// The backend or the transport reported a failure, verbatim
    RunFailed { error: Value },

    /// The stream ended
    RunFinished,
}
