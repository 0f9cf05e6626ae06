//! Trip planning session state machine
//!
//! [`TripSession`] owns the four pieces of session state and moves them
//! through the five stages in response to [`SessionEvent`]s. Collaborator
//! failures never escape a transition: they come back as [`Notice`]s while
//! the transition completes with fallback content.

mod error;
mod event;
mod export;
mod session;

pub use error::{ExportError, SessionError};
pub use event::{Collaborator, Notice, SessionEvent, Transition};
pub use export::{export_filename, export_itinerary};
pub use session::{GENERATION_FALLBACK, SUMMARY_PREFIX, SessionSettings, TripSession};
