//! SuggestionRecord - proposed vs. approved activity suggestions

use serde::Serialize;

/// Suggestion and itinerary text for the current planning cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionRecord {
    current_proposal: String,
    approved: String,
    pending_modification: Option<String>,
    itinerary: Option<String>,
}

impl SuggestionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest generated suggestion text (empty until suggestions are generated)
    pub fn current_proposal(&self) -> &str {
        &self.current_proposal
    }

    /// Suggestions the user accepted (empty until approval)
    pub fn approved(&self) -> &str {
        &self.approved
    }

    /// Latest revision produced while modifying suggestions
    pub fn pending_modification(&self) -> Option<&str> {
        self.pending_modification.as_deref()
    }

    /// Generated itinerary, once the itinerary stage has run
    pub fn itinerary(&self) -> Option<&str> {
        self.itinerary.as_deref()
    }

    pub fn is_approved(&self) -> bool {
        !self.approved.is_empty()
    }

    pub(crate) fn set_proposal(&mut self, text: impl Into<String>) {
        self.current_proposal = text.into();
    }

    pub(crate) fn set_pending_modification(&mut self, text: impl Into<String>) {
        self.pending_modification = Some(text.into());
    }

    pub(crate) fn approve(&mut self, text: impl Into<String>) {
        self.approved = text.into();
    }

    pub(crate) fn set_itinerary(&mut self, text: impl Into<String>) {
        self.itinerary = Some(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = SuggestionRecord::new();
        assert_eq!(record.current_proposal(), "");
        assert_eq!(record.approved(), "");
        assert!(record.pending_modification().is_none());
        assert!(record.itinerary().is_none());
        assert!(!record.is_approved());
    }

    #[test]
    fn test_approve_copies_text() {
        let mut record = SuggestionRecord::new();
        record.set_proposal("1. Baga Beach");
        record.approve(record.current_proposal().to_string());
        assert!(record.is_approved());
        assert_eq!(record.approved(), "1. Baga Beach");
    }

    #[test]
    fn test_pending_modification_is_separate_from_proposal() {
        let mut record = SuggestionRecord::new();
        record.set_proposal("original");
        record.set_pending_modification("revised");
        assert_eq!(record.current_proposal(), "original");
        assert_eq!(record.pending_modification(), Some("revised"));
    }
}
