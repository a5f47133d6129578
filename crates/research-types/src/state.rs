use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::run::StateUpdate;

/// One planned report section, as the agent describes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Whether this section is backed by web research
    #[serde(default)]
    pub research: bool,
    #[serde(default)]
    pub content: String,
}

/// Latest known structured state of a research thread.
///
/// Mutated only by backend events; unknown backend fields are ignored so
/// newer service versions do not break deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchState {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub completed_sections: Vec<String>,
    #[serde(default)]
    pub final_report: String,
}

impl ResearchState {
    pub fn has_topic(&self) -> bool {
        !self.topic.is_empty()
    }

    /// `final_report` is only meaningful once populated.
    pub fn has_report(&self) -> bool {
        !self.final_report.is_empty()
    }

    pub fn is_section_completed(&self, name: &str) -> bool {
        self.completed_sections.iter().any(|s| s == name)
    }

    /// Merge an optimistic local patch. Superseded entirely by the next
    /// authoritative snapshot.
    pub fn apply(&mut self, update: &StateUpdate) {
        if let Some(topic) = &update.topic {
            self.topic = topic.clone();
        }
    }
}

/// A backend-signaled pause awaiting human approval or feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interrupt {
    pub value: Value,
}

impl Interrupt {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Text projection for display. String payloads render verbatim,
    /// anything else pretty-prints.
    pub fn text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

/// One entry in the execution trace: the named task results of a
/// finished step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub created_at: String,
    pub tasks: Vec<TaskResult>,
}

impl Checkpoint {
    /// A checkpoint observed live, stamped with the time of receipt.
    pub fn new(id: impl Into<String>, tasks: Vec<TaskResult>) -> Self {
        Self {
            id: id.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            tasks,
        }
    }
}

/// A named task result with an arbitrary structured payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub name: String,
    pub result: Value,
}
