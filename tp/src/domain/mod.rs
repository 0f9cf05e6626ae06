//! Domain types for a trip planning session
//!
//! A session owns exactly four pieces of state:
//!
//! - [`Stage`] - where the user is in the five-stage workflow
//! - [`PreferenceSet`] - structured trip parameters from the form
//! - [`ConversationState`] - append-only log of turns with the generator
//! - [`SuggestionRecord`] - proposed vs. approved activity suggestions
//!
//! These types carry no I/O; the planner drives them.

mod conversation;
mod preferences;
mod stage;
mod suggestion;

pub use conversation::{ConversationState, Role, Turn, render_transcript};
pub(crate) use preferences::label_of;
pub use preferences::{
    AccommodationType, Budget, Choice, DietaryPreference, EndTime, Interest, MobilityConcern, PreferenceSet,
    RequiredField, StartTime, TripDuration, TripPurpose, ValidationError,
};
pub use stage::Stage;
pub use suggestion::SuggestionRecord;
