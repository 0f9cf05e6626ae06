//! Workflow stage

use serde::{Deserialize, Serialize};

/// Position in the five-stage planning workflow
///
/// ```text
/// InitialInput -> RefinePreferences -> GenerateSuggestions --> ModifySuggestions
///                                              |                      |
///                                              +--> GenerateItinerary <+
///
/// (restart) any stage --> InitialInput
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Collecting the structured preference form
    #[default]
    InitialInput,
    /// Free-text conversation to refine preferences
    RefinePreferences,
    /// Showing searched and generated activity suggestions
    GenerateSuggestions,
    /// Iterating on the suggestions with the user
    ModifySuggestions,
    /// Showing the final itinerary until restart
    GenerateItinerary,
}

impl Stage {
    /// All stages in workflow order
    pub const ALL: [Stage; 5] = [
        Stage::InitialInput,
        Stage::RefinePreferences,
        Stage::GenerateSuggestions,
        Stage::ModifySuggestions,
        Stage::GenerateItinerary,
    ];

    /// Heading shown by front ends for this stage
    pub fn title(&self) -> &'static str {
        match self {
            Self::InitialInput => "Let's start planning your trip!",
            Self::RefinePreferences => "Refine Your Travel Preferences",
            Self::GenerateSuggestions => "Activity Suggestions",
            Self::ModifySuggestions => "Modify Suggestions",
            Self::GenerateItinerary => "Your Personalized Travel Itinerary",
        }
    }

    /// Returns true if free-text chat input is meaningful in this stage
    pub fn accepts_chat(&self) -> bool {
        matches!(self, Self::RefinePreferences | Self::ModifySuggestions)
    }

    /// Check whether moving from this stage to `target` is a legal edge
    ///
    /// Self-loops are legal where the stage re-enters itself (refinement chat,
    /// modification rounds, regeneration). Restart to `InitialInput` is legal
    /// from every stage.
    pub fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (_, InitialInput)
                | (InitialInput, RefinePreferences)
                | (RefinePreferences, RefinePreferences)
                | (RefinePreferences, GenerateSuggestions)
                | (GenerateSuggestions, GenerateSuggestions)
                | (GenerateSuggestions, ModifySuggestions)
                | (GenerateSuggestions, GenerateItinerary)
                | (ModifySuggestions, ModifySuggestions)
                | (ModifySuggestions, GenerateItinerary)
                | (GenerateItinerary, GenerateItinerary)
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitialInput => write!(f, "initial_input"),
            Self::RefinePreferences => write!(f, "refine_preferences"),
            Self::GenerateSuggestions => write!(f, "generate_suggestions"),
            Self::ModifySuggestions => write!(f, "modify_suggestions"),
            Self::GenerateItinerary => write!(f, "generate_itinerary"),
        }
    }
}
