use serde::{Deserialize, Serialize};

/// Fixed service wiring for the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the agent-orchestration service
    pub api_url: String,
    /// Graph identifier runs are scheduled against
    pub assistant_id: String,
    /// Query parameter the thread id round-trips through
    pub thread_param: String,
    /// Maximum number of checkpoints requested when re-attaching to a thread
    pub history_limit: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:2024".to_string(),
            assistant_id: "open_deep_research".to_string(),
            thread_param: "threadId".to_string(),
            history_limit: 50,
        }
    }
}
