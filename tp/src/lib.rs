//! Trip Planner - stage-based conversational travel itinerary planner
//!
//! Collects travel preferences, refines them in conversation with a
//! text-generation service, grounds activity suggestions in web search and
//! turns the approved suggestions into a day-by-day itinerary.
//!
//! # Core Concepts
//!
//! - **One session, four pieces of state**: stage, preferences, conversation
//!   and suggestions live in a single [`planner::TripSession`]
//! - **Explicit transitions**: every trigger is a [`planner::SessionEvent`]
//!   handled by one call to `handle_event`
//! - **Failures never escape**: collaborator errors become fallback content
//!   plus a [`planner::Notice`]
//!
//! # Modules
//!
//! - [`domain`] - Stage, preference, conversation and suggestion types
//! - [`planner`] - The session state machine and itinerary export
//! - [`prompts`] - Prompt templates and assembly
//! - [`llm`] - Text-generation client trait and providers
//! - [`search`] - Web-search client trait and providers
//! - [`config`] - Configuration types and loading
//! - [`repl`] - Interactive terminal front end
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod repl;
pub mod search;

pub use config::Config;
pub use domain::{ConversationState, PreferenceSet, Stage, SuggestionRecord};
pub use planner::{Notice, SessionError, SessionEvent, Transition, TripSession};
