//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Preference-refinement instructions
pub const REFINE: &str = include_str!("../../prompts/refine.pmt");

/// Activity suggestions grounded in search results
pub const SUGGEST: &str = include_str!("../../prompts/suggest.pmt");

/// Revision of the current suggestions
pub const REVISE: &str = include_str!("../../prompts/revise.pmt");

/// Day-by-day itinerary
pub const ITINERARY: &str = include_str!("../../prompts/itinerary.pmt");

/// Names of every embedded template
pub const NAMES: [&str; 4] = ["refine", "suggest", "revise", "itinerary"];

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "refine" => Some(REFINE),
        "suggest" => Some(SUGGEST),
        "revise" => Some(REVISE),
        "itinerary" => Some(ITINERARY),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_is_embedded() {
        for name in NAMES {
            let content = get_embedded(name).unwrap();
            assert!(!content.trim().is_empty(), "{} is empty", name);
        }
    }

    #[test]
    fn test_suggest_has_placeholders() {
        for var in ["budget", "duration", "destination", "purpose", "preferences", "search_results"] {
            assert!(SUGGEST.contains(&format!("{{{{{}}}}}", var)), "missing {}", var);
        }
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("nonexistent").is_none());
    }
}
