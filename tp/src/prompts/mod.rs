//! Prompt Template System
//!
//! Template loading chain:
//! 1. `.tripplanner/prompts/{name}.pmt` (user override)
//! 2. `prompts/{name}.pmt` (project default)
//! 3. Embedded fallback in code
//!
//! Templates use Handlebars syntax with HTML escaping disabled.

mod context;
pub mod embedded;
mod loader;

pub use context::{ItineraryContext, OMITTED_SEARCH_RESULTS, ReviseContext, SuggestContext, search_query};
pub use loader::PromptLoader;
