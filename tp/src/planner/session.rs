//! TripSession - the stage state machine
//!
//! One session per user. Every external trigger goes through
//! [`TripSession::handle_event`], which runs a whole transition (including
//! any awaited collaborator calls) before returning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{ExportError, SessionError};
use super::event::{Collaborator, Notice, SessionEvent, Transition};
use super::export::export_itinerary;
use crate::config::Config;
use crate::domain::{ConversationState, PreferenceSet, Stage, SuggestionRecord};
use crate::llm::LlmClient;
use crate::prompts::{PromptLoader, search_query};
use crate::search::{SearchClient, SearchHit, format_results};

/// Text stored in place of a failed generation
pub const GENERATION_FALLBACK: &str = "Sorry, I couldn't process that request. Please try again.";

/// Opening line of the user turn that records the submitted form
pub const SUMMARY_PREFIX: &str = "I want to plan a trip with these details:\n";

const MODIFY_REQUEST: &str = "I'd like to modify the suggestions.";
const MODIFY_PROMPT: &str = "What modifications would you like to make to the suggestions?";
const FURTHER_MODIFY_REQUEST: &str = "I'd like to make more modifications.";
const FURTHER_MODIFY_PROMPT: &str = "Please let me know what additional changes you'd like to make.";

/// Tunables a session reads on every transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Lowercased words that move refinement on to suggestions
    pub advance_keywords: Vec<String>,
    /// Memoize successful generations by exact prompt
    pub cache_prompts: bool,
    /// Turns of recent conversation included in a revision prompt
    pub revision_context_turns: usize,
    /// Search hits embedded in the suggestion prompt
    pub max_results: usize,
    /// Characters of each hit's content embedded in the prompt
    pub content_chars: usize,
    /// Token cap per generation
    pub max_tokens: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            advance_keywords: config
                .planner
                .advance_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            cache_prompts: config.planner.cache_prompts,
            revision_context_turns: config.planner.revision_context_turns,
            max_results: config.search.max_results,
            content_chars: config.search.content_chars,
            max_tokens: config.llm.max_tokens,
        }
    }

    /// Returns true if the message asks to move on to suggestions
    pub fn is_advance_request(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        self.advance_keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// A single trip-planning session
pub struct TripSession {
    id: String,
    stage: Stage,
    preferences: PreferenceSet,
    conversation: ConversationState,
    suggestions: SuggestionRecord,
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchClient>,
    prompts: PromptLoader,
    settings: SessionSettings,
    cache: HashMap<String, String>,
}

impl std::fmt::Debug for TripSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripSession")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .field("turns", &self.conversation.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl TripSession {
    /// Create a session in `InitialInput` with default state
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
        prompts: PromptLoader,
        settings: SessionSettings,
    ) -> Self {
        let id = Uuid::now_v7().to_string();
        debug!(%id, ?settings, "TripSession::new: called");
        Self {
            id,
            stage: Stage::default(),
            preferences: PreferenceSet::default(),
            conversation: ConversationState::new(),
            suggestions: SuggestionRecord::new(),
            llm,
            search,
            prompts,
            settings,
            cache: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn preferences(&self) -> &PreferenceSet {
        &self.preferences
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn suggestions(&self) -> &SuggestionRecord {
        &self.suggestions
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Write the generated itinerary into `dir`
    pub fn export(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export_itinerary(self, dir)
    }

    /// Handle one external trigger
    ///
    /// Returns the stage change plus any collaborator notices. An event the
    /// current stage does not accept, or a form that fails validation, is
    /// rejected without touching the session.
    ///
    /// `Restart` is accepted in every stage, not only `GenerateItinerary`,
    /// and resets all session state back to `InitialInput`.
    pub async fn handle_event(&mut self, event: SessionEvent) -> Result<Transition, SessionError> {
        let from = self.stage;
        debug!(session = %self.id, %from, %event, "handle_event: called");
        let mut notices = Vec::new();

        match (from, event) {
            (_, SessionEvent::Restart) => self.restart(),

            (Stage::InitialInput, SessionEvent::SubmitPreferences(prefs)) => {
                self.submit_preferences(prefs, &mut notices).await?;
            }

            (Stage::RefinePreferences, SessionEvent::ChatInput(message)) => {
                self.conversation.push_user(message.as_str());
                if self.settings.is_advance_request(&message) {
                    debug!("handle_event: advance keyword found");
                    self.enter_suggestions(&mut notices).await;
                } else {
                    let prompt = self.prompts.refine_chat(self.conversation.turns());
                    let reply = self.generate(prompt, &mut notices).await;
                    self.conversation.push_assistant(reply);
                }
            }

            (Stage::RefinePreferences, SessionEvent::ReadyForSuggestions) => {
                self.enter_suggestions(&mut notices).await;
            }

            (Stage::GenerateSuggestions, SessionEvent::ApproveSuggestions) => {
                let proposal = self.suggestions.current_proposal().to_string();
                self.suggestions.approve(proposal);
                self.enter_itinerary(&mut notices).await;
            }

            (Stage::GenerateSuggestions, SessionEvent::RequestModifications) => {
                self.conversation.push_user(MODIFY_REQUEST);
                self.conversation.push_assistant(MODIFY_PROMPT);
                self.set_stage(Stage::ModifySuggestions);
            }

            (Stage::GenerateSuggestions, SessionEvent::Regenerate) => {
                self.enter_suggestions(&mut notices).await;
            }

            (Stage::ModifySuggestions, SessionEvent::ChatInput(message)) => {
                self.revise_suggestions(&message, &mut notices).await;
            }

            (Stage::ModifySuggestions, SessionEvent::ApproveModified) => {
                let approved = match self.suggestions.pending_modification() {
                    Some(revision) => revision.to_string(),
                    None => {
                        debug!("handle_event: no revision, approving latest assistant turn");
                        self.conversation
                            .last_assistant()
                            .map(|t| t.content.clone())
                            .unwrap_or_default()
                    }
                };
                self.suggestions.approve(approved);
                self.enter_itinerary(&mut notices).await;
            }

            (Stage::ModifySuggestions, SessionEvent::RequestFurtherModifications) => {
                self.conversation.push_user(FURTHER_MODIFY_REQUEST);
                self.conversation.push_assistant(FURTHER_MODIFY_PROMPT);
            }

            (Stage::GenerateItinerary, SessionEvent::Regenerate) => {
                self.enter_itinerary(&mut notices).await;
            }

            (stage, event) => {
                debug!(%stage, %event, "handle_event: event not accepted in this stage");
                return Err(SessionError::UnexpectedEvent {
                    stage,
                    event: event.name(),
                });
            }
        }

        Ok(Transition {
            from,
            to: self.stage,
            notices,
        })
    }

    async fn submit_preferences(&mut self, prefs: PreferenceSet, notices: &mut Vec<Notice>) -> Result<(), SessionError> {
        debug!(destination = %prefs.destination, "submit_preferences: called");
        if let Err(e) = prefs.validate() {
            info!(missing = ?e.missing, "Preference form rejected");
            return Err(e.into());
        }

        self.preferences = prefs;
        self.conversation
            .push_user(format!("{}{}", SUMMARY_PREFIX, self.preferences.summary()));

        let prompt = self.prompts.refine_initial(&self.preferences);
        let reply = self.generate(prompt, notices).await;
        self.conversation.push_assistant(reply);

        self.set_stage(Stage::RefinePreferences);
        Ok(())
    }

    /// Entry action for `GenerateSuggestions`: search, then generate
    async fn enter_suggestions(&mut self, notices: &mut Vec<Notice>) {
        debug!("enter_suggestions: called");
        self.set_stage(Stage::GenerateSuggestions);

        let query = search_query(&self.preferences);
        let hits = self.search(&query, notices).await;
        let results = format_results(&hits, self.settings.max_results, self.settings.content_chars);

        let prompt = self.prompts.suggest(&self.preferences, &results);
        let proposal = self.generate(prompt, notices).await;
        self.suggestions.set_proposal(proposal);
    }

    /// Entry action for `GenerateItinerary`
    async fn enter_itinerary(&mut self, notices: &mut Vec<Notice>) {
        debug!("enter_itinerary: called");
        self.set_stage(Stage::GenerateItinerary);

        let prompt = self.prompts.itinerary(&self.preferences, self.suggestions.approved());
        let itinerary = self.generate(prompt, notices).await;
        self.suggestions.set_itinerary(itinerary);
    }

    async fn revise_suggestions(&mut self, message: &str, notices: &mut Vec<Notice>) {
        debug!(message_len = message.len(), "revise_suggestions: called");
        self.conversation.push_user(message);

        let proposal = self
            .suggestions
            .pending_modification()
            .unwrap_or(self.suggestions.current_proposal())
            .to_string();
        let recent = self.conversation.recent(self.settings.revision_context_turns);
        let prompt = self.prompts.revise(&self.preferences, &proposal, recent, message);

        let revision = self.generate(prompt, notices).await;
        self.conversation.push_assistant(revision.as_str());
        self.suggestions.set_pending_modification(revision);
    }

    /// Replace all four entities at once
    fn restart(&mut self) {
        info!(session = %self.id, from = %self.stage, "Restarting session");
        self.preferences = PreferenceSet::default();
        self.conversation = ConversationState::new();
        self.suggestions = SuggestionRecord::new();
        self.cache.clear();
        self.stage = Stage::InitialInput;
    }

    fn set_stage(&mut self, to: Stage) {
        debug_assert!(self.stage.can_transition_to(&to), "illegal edge {} -> {}", self.stage, to);
        if self.stage != to {
            info!(session = %self.id, from = %self.stage, %to, "Stage transition");
        }
        self.stage = to;
    }

    /// Call the text generator, substituting the fallback text on any failure
    async fn generate(&mut self, prompt: eyre::Result<String>, notices: &mut Vec<Notice>) -> String {
        let prompt = match prompt {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "generate: prompt assembly failed");
                notices.push(Notice::new(Collaborator::Generation, e.to_string()));
                return GENERATION_FALLBACK.to_string();
            }
        };

        if self.settings.cache_prompts
            && let Some(cached) = self.cache.get(&prompt)
        {
            debug!("generate: prompt cache hit");
            return cached.clone();
        }

        debug!(prompt_len = prompt.len(), "generate: calling text generator");
        match self.llm.generate(&prompt, self.settings.max_tokens).await {
            Ok(text) => {
                if self.settings.cache_prompts {
                    self.cache.insert(prompt, text.clone());
                }
                text
            }
            Err(e) => {
                warn!(error = %e, "generate: text generation failed");
                notices.push(Notice::new(Collaborator::Generation, e.to_string()));
                GENERATION_FALLBACK.to_string()
            }
        }
    }

    /// Call the search service, substituting no results on any failure
    async fn search(&self, query: &str, notices: &mut Vec<Notice>) -> Vec<SearchHit> {
        debug!(%query, "search: called");
        match self.search.search(query, self.settings.max_results).await {
            Ok(hits) => {
                debug!(hit_count = hits.len(), "search: success");
                hits
            }
            Err(e) => {
                warn!(error = %e, "search: web search failed");
                notices.push(Notice::new(Collaborator::Search, e.to_string()));
                Vec::new()
            }
        }
    }
}
