//! Session and export error types

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Stage, ValidationError};

/// Errors returned by [`TripSession::handle_event`](super::TripSession::handle_event)
///
/// Either way the session is left exactly as it was before the event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot handle {event} during {stage}")]
    UnexpectedEvent { stage: Stage, event: &'static str },
}

/// Errors writing an itinerary to disk
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No itinerary has been generated yet")]
    NoItinerary,

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequiredField;

    #[test]
    fn test_validation_message_passes_through() {
        let err: SessionError = ValidationError {
            missing: vec![RequiredField::Budget, RequiredField::Destination],
        }
        .into();
        assert_eq!(err.to_string(), "Please fill in these required fields: budget, destination");
    }

    #[test]
    fn test_unexpected_event_message() {
        let err = SessionError::UnexpectedEvent {
            stage: Stage::InitialInput,
            event: "approve_suggestions",
        };
        assert_eq!(err.to_string(), "Cannot handle approve_suggestions during initial_input");
    }
}
