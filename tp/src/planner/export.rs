//! Plain-text itinerary export

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::ExportError;
use super::session::TripSession;

/// File name an itinerary for `destination` is saved under
pub fn export_filename(destination: &str) -> String {
    format!("travel_itinerary_{}.txt", destination.trim().replace(' ', "_"))
}

/// Write the session's itinerary to `dir`, creating the directory if needed
pub fn export_itinerary(session: &TripSession, dir: &Path) -> Result<PathBuf, ExportError> {
    debug!(?dir, "export_itinerary: called");
    let itinerary = session.suggestions().itinerary().ok_or(ExportError::NoItinerary)?;

    let path = dir.join(export_filename(&session.preferences().destination));
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, itinerary).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "Itinerary exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, PreferenceSet, TripDuration};
    use crate::llm::client::mock::MockLlmClient;
    use crate::planner::{SessionEvent, SessionSettings};
    use crate::prompts::PromptLoader;
    use crate::search::client::mock::MockSearchClient;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn session() -> TripSession {
        TripSession::new(
            Arc::new(MockLlmClient::numbered("itinerary")),
            Arc::new(MockSearchClient::numbered(2)),
            PromptLoader::embedded_only(),
            SessionSettings::default(),
        )
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Goa"), "travel_itinerary_Goa.txt");
        assert_eq!(export_filename("New Delhi"), "travel_itinerary_New_Delhi.txt");
        assert_eq!(export_filename(" Port Blair "), "travel_itinerary_Port_Blair.txt");
    }

    #[test]
    fn test_export_without_itinerary() {
        let dir = TempDir::new().unwrap();
        let err = export_itinerary(&session(), dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::NoItinerary));
    }

    #[tokio::test]
    async fn test_export_writes_itinerary() {
        let mut s = session();
        let prefs = PreferenceSet {
            budget: Some(Budget::Above400k),
            duration: Some(TripDuration::OneToTwoWeeks),
            destination: "New Delhi".to_string(),
            ..Default::default()
        };
        s.handle_event(SessionEvent::SubmitPreferences(prefs)).await.unwrap();
        s.handle_event(SessionEvent::ReadyForSuggestions).await.unwrap();
        s.handle_event(SessionEvent::ApproveSuggestions).await.unwrap();

        let dir = TempDir::new().unwrap();
        let out = dir.path().join("trips");
        let path = s.export(&out).unwrap();

        assert_eq!(path, out.join("travel_itinerary_New_Delhi.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "itinerary #3");
    }
}
