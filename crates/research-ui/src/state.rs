//! UI-local state — everything the page owns besides the session
//! snapshot: form field contents, the feedback dialog flag, the trace
//! panel disclosure, and the parsed-report cache. All of it resets with
//! a new session; none of it persists.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::markdown::{parse_markdown, Block};

/// Disclosure state of the trace panel. The transitions are asymmetric:
/// a click on the body only ever opens the panel; only the toggle
/// control closes it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    Collapsed,
    Expanded,
}

impl Disclosure {
    pub fn is_expanded(&self) -> bool {
        matches!(self, Disclosure::Expanded)
    }

    /// A click anywhere in the panel body: an entry affordance while
    /// collapsed, a no-op while expanded.
    pub fn on_body_click(&mut self) {
        if matches!(self, Disclosure::Collapsed) {
            *self = Disclosure::Expanded;
        }
    }

    /// A click on the toggle control flips either way.
    pub fn on_toggle(&mut self) {
        *self = match self {
            Disclosure::Collapsed => Disclosure::Expanded,
            Disclosure::Expanded => Disclosure::Collapsed,
        };
    }
}

/// State visible to the panels.
pub struct UiState {
    /// Topic form field content
    pub topic_input: String,
    /// Feedback dialog field content
    pub feedback_input: String,
    /// Whether the feedback dialog is open
    pub show_feedback_dialog: bool,
    /// Trace panel disclosure
    pub trace_disclosure: Disclosure,
    report_cache: Option<ReportCache>,
}

struct ReportCache {
    fingerprint: u64,
    blocks: Vec<Block>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            topic_input: String::new(),
            feedback_input: String::new(),
            show_feedback_dialog: false,
            trace_disclosure: Disclosure::Collapsed,
            report_cache: None,
        }
    }

    /// Fresh-session reset: clear the forms, close the dialog, collapse
    /// the trace, drop the parsed report.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Parsed block tree for the report, re-parsed only when the source
    /// text changes between frames.
    pub fn report_blocks(&mut self, markdown: &str) -> &[Block] {
        let fingerprint = fingerprint(markdown);
        let stale = self
            .report_cache
            .as_ref()
            .map_or(true, |cache| cache.fingerprint != fingerprint);
        if stale {
            self.report_cache = Some(ReportCache {
                fingerprint,
                blocks: parse_markdown(markdown),
            });
        }
        match &self.report_cache {
            Some(cache) => &cache.blocks,
            None => &[],
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

fn fingerprint(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}
