//! Session events and transition results

use crate::domain::{PreferenceSet, Stage};

/// An external trigger delivered to [`TripSession::handle_event`](super::TripSession::handle_event)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Structured form submission
    SubmitPreferences(PreferenceSet),
    /// Free-text chat message
    ChatInput(String),
    /// Move from refinement to suggestions without a trigger keyword
    ReadyForSuggestions,
    /// Accept the generated suggestions
    ApproveSuggestions,
    /// Start a modification round on the generated suggestions
    RequestModifications,
    /// Accept the revised suggestions
    ApproveModified,
    /// Ask for another modification round
    RequestFurtherModifications,
    /// Re-run the current stage's generation
    Regenerate,
    /// Throw the session state away and start over
    Restart,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitPreferences(_) => "submit_preferences",
            Self::ChatInput(_) => "chat_input",
            Self::ReadyForSuggestions => "ready_for_suggestions",
            Self::ApproveSuggestions => "approve_suggestions",
            Self::RequestModifications => "request_modifications",
            Self::ApproveModified => "approve_modified",
            Self::RequestFurtherModifications => "request_further_modifications",
            Self::Regenerate => "regenerate",
            Self::Restart => "restart",
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// External service a notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Generation,
    Search,
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generation => write!(f, "generation"),
            Self::Search => write!(f, "search"),
        }
    }
}

/// Non-fatal report of a collaborator failure
///
/// The transition that produced it still completed, using fallback content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub source: Collaborator,
    pub message: String,
}

impl Notice {
    pub fn new(source: Collaborator, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error with {} service: {}", self.source, self.message)
    }
}

/// Result of one handled event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Stage,
    pub to: Stage,
    pub notices: Vec<Notice>,
}

impl Transition {
    /// True when the stage changed
    pub fn moved(&self) -> bool {
        self.from != self.to
    }

    pub fn is_clean(&self) -> bool {
        self.notices.is_empty()
    }
}
