use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Value carried by a resume directive: `true` approves, a string is
/// free-text feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResumeValue {
    Approve(bool),
    Feedback(String),
}

impl ResumeValue {
    pub fn approve() -> Self {
        ResumeValue::Approve(true)
    }

    pub fn feedback(text: impl Into<String>) -> Self {
        ResumeValue::Feedback(text.into())
    }
}

/// Directive resuming an interrupted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCommand {
    pub resume: ResumeValue,
}

/// Payload handed to the transport for one run. Serializes to the wire
/// shape the service expects: `input` for fresh submissions, `command`
/// for resumes, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<RunCommand>,
}

/// Optimistic local patch shown until the backend confirms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// A user action about to become a run.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub input: Option<Value>,
    pub command: Option<RunCommand>,
    pub optimistic: Option<StateUpdate>,
}

impl Submission {
    /// Start (or continue) research on a topic. The topic doubles as the
    /// optimistic snapshot shown before the backend echoes it back.
    pub fn topic(topic: impl Into<String>) -> Self {
        let topic = topic.into();
        Self {
            input: Some(json!({ "topic": topic })),
            command: None,
            optimistic: Some(StateUpdate {
                topic: Some(topic),
            }),
        }
    }

    /// Resume an interrupted run with an approval or feedback text.
    pub fn resume(value: ResumeValue) -> Self {
        Self {
            input: None,
            command: Some(RunCommand { resume: value }),
            optimistic: None,
        }
    }
}
