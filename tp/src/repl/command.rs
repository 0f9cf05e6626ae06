//! Slash commands

use std::path::PathBuf;

use crate::domain::Stage;
use crate::planner::SessionEvent;

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ready,
    Approve,
    Modify,
    More,
    Regenerate,
    Restart,
    Export(Option<PathBuf>),
    History,
    Prefs,
    Stage,
    Help,
    Quit,
}

impl Command {
    /// Parse a line starting with `/`
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let arg = parts.next();

        let command = match cmd {
            "/ready" | "/r" => Self::Ready,
            "/approve" | "/a" => Self::Approve,
            "/modify" | "/m" => Self::Modify,
            "/more" => Self::More,
            "/regenerate" | "/regen" => Self::Regenerate,
            "/restart" => Self::Restart,
            "/export" | "/e" => Self::Export(arg.map(PathBuf::from)),
            "/history" => Self::History,
            "/prefs" | "/p" => Self::Prefs,
            "/stage" => Self::Stage,
            "/help" | "/h" => Self::Help,
            "/quit" | "/q" | "/exit" => Self::Quit,
            other => return Err(format!("Unknown command: {}", other)),
        };
        Ok(command)
    }

    /// Session event this command sends in `stage`, if it maps to one
    ///
    /// `/approve` means approving the suggestions or the revision, whichever
    /// the stage is showing.
    pub fn event(&self, stage: Stage) -> Option<SessionEvent> {
        match (self, stage) {
            (Self::Ready, _) => Some(SessionEvent::ReadyForSuggestions),
            (Self::Approve, Stage::ModifySuggestions) => Some(SessionEvent::ApproveModified),
            (Self::Approve, _) => Some(SessionEvent::ApproveSuggestions),
            (Self::Modify, Stage::ModifySuggestions) | (Self::More, _) => {
                Some(SessionEvent::RequestFurtherModifications)
            }
            (Self::Modify, _) => Some(SessionEvent::RequestModifications),
            (Self::Regenerate, _) => Some(SessionEvent::Regenerate),
            (Self::Restart, _) => Some(SessionEvent::Restart),
            _ => None,
        }
    }
}

/// Commands offered in each stage, for the prompt hint line
pub fn stage_hint(stage: Stage) -> &'static str {
    match stage {
        Stage::InitialInput => "fill in the form to start",
        Stage::RefinePreferences => "chat to refine, or /ready for suggestions",
        Stage::GenerateSuggestions => "/approve, /modify or /regenerate",
        Stage::ModifySuggestions => "describe changes, then /approve or /more",
        Stage::GenerateItinerary => "/export, /regenerate or /restart",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/ready").unwrap(), Command::Ready);
        assert_eq!(Command::parse("/q").unwrap(), Command::Quit);
        assert_eq!(Command::parse("/export").unwrap(), Command::Export(None));
        assert_eq!(
            Command::parse("/export  /tmp/trips ").unwrap(),
            Command::Export(Some(PathBuf::from("/tmp/trips")))
        );
        assert!(Command::parse("/fly").is_err());
    }

    #[test]
    fn test_approve_depends_on_stage() {
        assert_eq!(
            Command::Approve.event(Stage::GenerateSuggestions),
            Some(SessionEvent::ApproveSuggestions)
        );
        assert_eq!(
            Command::Approve.event(Stage::ModifySuggestions),
            Some(SessionEvent::ApproveModified)
        );
    }

    #[test]
    fn test_modify_depends_on_stage() {
        assert_eq!(
            Command::Modify.event(Stage::GenerateSuggestions),
            Some(SessionEvent::RequestModifications)
        );
        assert_eq!(
            Command::Modify.event(Stage::ModifySuggestions),
            Some(SessionEvent::RequestFurtherModifications)
        );
        assert_eq!(
            Command::More.event(Stage::ModifySuggestions),
            Some(SessionEvent::RequestFurtherModifications)
        );
    }

    #[test]
    fn test_local_commands_have_no_event() {
        for cmd in [Command::History, Command::Prefs, Command::Stage, Command::Help, Command::Quit] {
            assert_eq!(cmd.event(Stage::RefinePreferences), None);
        }
        assert_eq!(Command::Export(None).event(Stage::GenerateItinerary), None);
    }

    #[test]
    fn test_every_stage_has_a_hint() {
        for stage in Stage::ALL {
            assert!(!stage_hint(stage).is_empty());
        }
    }
}
