//! Conversation log between the user and the text generator

use serde::{Deserialize, Serialize};

/// Speaker of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only ordered log of turns
///
/// Turns can be appended and read but never edited or removed. The only way
/// to empty a conversation is to replace it with a new one on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    turns: Vec<Turn>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Append an assistant turn
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns spoken by `role`
    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }

    /// The most recent assistant turn, if any
    pub fn last_assistant(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == Role::Assistant)
    }

    /// The last `n` turns (or all of them if there are fewer)
    pub fn recent(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }
}

/// Render turns as `role: content` lines for embedding in a prompt
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut convo = ConversationState::new();
        convo.push_user("hello");
        convo.push_assistant("hi");
        convo.push_user("plan a trip");

        let roles: Vec<_> = convo.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(convo.len(), 3);
        assert_eq!(convo.count(Role::User), 2);
        assert_eq!(convo.count(Role::Assistant), 1);
    }

    #[test]
    fn test_last_assistant() {
        let mut convo = ConversationState::new();
        assert!(convo.last_assistant().is_none());

        convo.push_assistant("first");
        convo.push_user("question");
        convo.push_assistant("second");
        convo.push_user("another");

        assert_eq!(convo.last_assistant().unwrap().content, "second");
    }

    #[test]
    fn test_recent_window() {
        let mut convo = ConversationState::new();
        for i in 0..6 {
            convo.push_user(format!("m{}", i));
        }
        let recent: Vec<_> = convo.recent(4).iter().map(|t| t.content.as_str()).collect();
        assert_eq!(recent, vec!["m2", "m3", "m4", "m5"]);
        assert_eq!(convo.recent(100).len(), 6);
    }

    #[test]
    fn test_render_transcript() {
        let turns = vec![Turn::user("I want Goa"), Turn::assistant("Great choice!")];
        assert_eq!(render_transcript(&turns), "user: I want Goa\nassistant: Great choice!");
        assert_eq!(render_transcript(&[]), "");
    }
}
