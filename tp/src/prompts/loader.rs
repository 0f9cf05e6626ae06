//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults,
//! and assembles the exact prompt strings sent to the text generator.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::context::{ItineraryContext, OMITTED_SEARCH_RESULTS, ReviseContext, SuggestContext};
use super::embedded;
use crate::domain::{PreferenceSet, Turn, render_transcript};

/// Separator between the refine instructions and the preference summary
const INITIAL_INFO_HEADER: &str = "\n\nUser has provided the following information:\n";

/// Separator between the refine instructions and the transcript
const HISTORY_HEADER: &str = "\n\nConversation history:\n";

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (`.tripplanner/prompts/`)
    user_dir: Option<PathBuf>,
    /// Project default directory (`prompts/`)
    repo_dir: Option<PathBuf>,
}

impl std::fmt::Debug for PromptLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptLoader")
            .field("user_dir", &self.user_dir)
            .field("repo_dir", &self.repo_dir)
            .finish()
    }
}

/// Template engine with HTML escaping off; labels like "Food & Cuisine" go out verbatim
fn engine() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs
}

impl PromptLoader {
    /// Create a loader rooted at `root`
    ///
    /// Looks for `.tripplanner/prompts/` and `prompts/` under the root.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        debug!(?root, "PromptLoader::new: called");
        let user_dir = root.join(".tripplanner/prompts");
        let repo_dir = root.join("prompts");

        let user_dir_exists = user_dir.exists();
        let repo_dir_exists = repo_dir.exists();
        debug!(
            ?user_dir,
            %user_dir_exists,
            ?repo_dir,
            %repo_dir_exists,
            "PromptLoader::new: checking directories"
        );

        Self {
            hbs: engine(),
            user_dir: if user_dir_exists { Some(user_dir) } else { None },
            repo_dir: if repo_dir_exists { Some(repo_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: engine(),
            user_dir: None,
            repo_dir: None,
        }
    }

    /// Load a template by name, trying the lookup chain
    pub fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in [&self.user_dir, &self.repo_dir].into_iter().flatten() {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found on disk");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        let rendered = self
            .hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))?;
        Ok(rendered.trim_end().to_string())
    }

    /// First refinement prompt, built from the submitted preferences
    pub fn refine_initial(&self, prefs: &PreferenceSet) -> Result<String> {
        debug!("PromptLoader::refine_initial: called");
        let instructions = self.render("refine", &serde_json::json!({}))?;
        Ok(format!("{}{}{}", instructions, INITIAL_INFO_HEADER, prefs.summary()))
    }

    /// Refinement prompt grounded in the whole conversation so far
    pub fn refine_chat(&self, turns: &[Turn]) -> Result<String> {
        debug!(turn_count = turns.len(), "PromptLoader::refine_chat: called");
        let instructions = self.render("refine", &serde_json::json!({}))?;
        Ok(format!("{}{}{}", instructions, HISTORY_HEADER, render_transcript(turns)))
    }

    /// Suggestion prompt with the formatted search-result block embedded
    pub fn suggest(&self, prefs: &PreferenceSet, search_results: &str) -> Result<String> {
        debug!(results_len = search_results.len(), "PromptLoader::suggest: called");
        self.render("suggest", &SuggestContext::new(prefs, search_results))
    }

    /// Revision prompt for requested changes to the current proposal
    pub fn revise(
        &self,
        prefs: &PreferenceSet,
        current_proposal: &str,
        recent: &[Turn],
        requested_changes: &str,
    ) -> Result<String> {
        debug!(recent_count = recent.len(), "PromptLoader::revise: called");
        let suggest = self.render("suggest", &SuggestContext::new(prefs, OMITTED_SEARCH_RESULTS))?;
        self.render(
            "revise",
            &ReviseContext::new(suggest, current_proposal, recent, requested_changes),
        )
    }

    /// Itinerary prompt for the approved suggestions
    pub fn itinerary(&self, prefs: &PreferenceSet, approved: &str) -> Result<String> {
        debug!(approved_len = approved.len(), "PromptLoader::itinerary: called");
        self.render("itinerary", &ItineraryContext::new(prefs, approved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, Interest, StartTime, TripDuration, TripPurpose};
    use tempfile::TempDir;

    fn goa() -> PreferenceSet {
        let mut prefs = PreferenceSet {
            budget: Some(Budget::Under40k),
            duration: Some(TripDuration::ThreeToFourDays),
            destination: "Goa".to_string(),
            purpose: Some(TripPurpose::FoodAndCuisine),
            ..Default::default()
        };
        prefs.add_interest(Interest::FoodAndDining);
        prefs
    }

    #[test]
    fn test_refine_initial_appends_summary() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader.refine_initial(&goa()).unwrap();

        assert!(prompt.starts_with("You are an AI travel planner."));
        assert!(prompt.contains("\n\nUser has provided the following information:\nBudget: Under ₹40,000\n"));
        assert!(prompt.ends_with("End Time: 21:00"));
    }

    #[test]
    fn test_refine_chat_renders_history() {
        let loader = PromptLoader::embedded_only();
        let turns = vec![Turn::user("Goa please"), Turn::assistant("What budget?")];
        let prompt = loader.refine_chat(&turns).unwrap();

        assert!(prompt.ends_with("\n\nConversation history:\nuser: Goa please\nassistant: What budget?"));
    }

    #[test]
    fn test_suggest_does_not_escape_labels() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader.suggest(&goa(), "Source 1: Fish Thali\n").unwrap();

        assert!(prompt.contains("purpose: Food & Cuisine"));
        assert!(prompt.contains("preferences: Food & Dining with  mobility concerns"));
        assert!(prompt.contains("Source 1: Fish Thali"));
        assert!(!prompt.contains("&amp;"));
    }

    #[test]
    fn test_revise_omits_search_results() {
        let loader = PromptLoader::embedded_only();
        let recent = vec![Turn::user("more beaches")];
        let prompt = loader.revise(&goa(), "1. Baga Beach", &recent, "more beaches").unwrap();

        assert!(prompt.contains(OMITTED_SEARCH_RESULTS));
        assert!(prompt.contains("1. Baga Beach"));
        assert!(prompt.contains("user: more beaches"));
        assert!(prompt.contains("modifications to the suggestions:\nmore beaches"));
    }

    #[test]
    fn test_itinerary_includes_times_and_approved() {
        let loader = PromptLoader::embedded_only();
        let mut prefs = goa();
        prefs.start_time = StartTime::new(7).unwrap();
        let prompt = loader.itinerary(&prefs, "Approved list").unwrap();

        assert!(prompt.contains("Approved list"));
        assert!(prompt.contains("Start time each day: 07:00"));
        assert!(prompt.contains("End time each day: 21:00"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let loader = PromptLoader::embedded_only();
        assert_eq!(loader.itinerary(&goa(), "x").unwrap(), loader.itinerary(&goa(), "x").unwrap());
    }

    #[test]
    fn test_user_override_wins() {
        let dir = TempDir::new().unwrap();
        let prompts = dir.path().join(".tripplanner/prompts");
        std::fs::create_dir_all(&prompts).unwrap();
        std::fs::write(prompts.join("itinerary.pmt"), "Plan {{destination}} from {{start_time}}\n").unwrap();

        let loader = PromptLoader::new(dir.path());
        assert_eq!(loader.itinerary(&goa(), "x").unwrap(), "Plan Goa from 09:00");
        assert!(loader.suggest(&goa(), "").unwrap().contains("activity suggestions"));
    }

    #[test]
    fn test_repo_dir_used_when_no_override() {
        let dir = TempDir::new().unwrap();
        let prompts = dir.path().join("prompts");
        std::fs::create_dir_all(&prompts).unwrap();
        std::fs::write(prompts.join("refine.pmt"), "Ask questions.").unwrap();

        let loader = PromptLoader::new(dir.path());
        let prompt = loader.refine_initial(&goa()).unwrap();
        assert!(prompt.starts_with("Ask questions.\n\nUser has provided"));
    }

    #[test]
    fn test_unknown_template() {
        let loader = PromptLoader::embedded_only();
        assert!(loader.load_template("nonexistent-template").is_err());
    }
}
