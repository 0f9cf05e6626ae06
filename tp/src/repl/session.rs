//! REPL session management

use std::path::PathBuf;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use super::command::{Command, stage_hint};
use super::form::FormReader;
use crate::domain::{PreferenceSet, Role, Stage};
use crate::planner::{SessionError, SessionEvent, Transition, TripSession};

/// Characters of each turn shown by `/history`
const HISTORY_PREVIEW_CHARS: usize = 60;

/// Interactive front end over one [`TripSession`]
pub struct ReplSession {
    session: TripSession,
    export_dir: PathBuf,
    /// Form values carried into the next form walk
    draft: PreferenceSet,
}

impl ReplSession {
    pub fn new(session: TripSession, export_dir: PathBuf) -> Self {
        Self {
            session,
            export_dir,
            draft: PreferenceSet::default(),
        }
    }

    /// Pre-fill the destination field of the form
    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.draft.destination = destination.into();
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            if self.session.stage() == Stage::InitialInput {
                println!("{}", Stage::InitialInput.title().bright_cyan().bold());
                let Some(prefs) = FormReader::new(&mut rl).read(&self.draft)? else {
                    println!();
                    break;
                };
                self.draft = prefs.clone();
                self.dispatch(SessionEvent::SubmitPreferences(prefs)).await;
                continue;
            }

            let readline = rl.readline(&format!("{} ", ">".bright_green()));
            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match Command::parse(input) {
                            Ok(Command::Quit) => break,
                            Ok(command) => self.handle_command(command).await,
                            Err(e) => {
                                println!("{} {}", "?".yellow(), e);
                                println!("Type {} for available commands", "/help".yellow());
                            }
                        }
                    } else if self.session.stage().accepts_chat() {
                        self.dispatch(SessionEvent::ChatInput(input.to_string())).await;
                    } else {
                        println!("{} {}", "?".yellow(), stage_hint(self.session.stage()));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "AI Travel Planner".bright_cyan().bold());
        println!("Itineraries are exported to: {}", self.export_dir.display());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    async fn handle_command(&mut self, command: Command) {
        debug!(?command, "handle_command: called");
        if let Some(event) = command.event(self.session.stage()) {
            self.dispatch(event).await;
            return;
        }

        match command {
            Command::Export(dir) => {
                let dir = dir.unwrap_or_else(|| self.export_dir.clone());
                match self.session.export(&dir) {
                    Ok(path) => println!("{} {}", "Saved itinerary to".green(), path.display()),
                    Err(e) => println!("{} {}", "!".red(), e),
                }
            }
            Command::History => self.print_history(),
            Command::Prefs => self.print_prefs(),
            Command::Stage => {
                let stage = self.session.stage();
                println!("{} ({}): {}", stage.title().bright_cyan(), stage, stage_hint(stage).dimmed());
            }
            Command::Help => self.print_help(),
            _ => {}
        }
    }

    /// Send one event to the session and show the outcome
    async fn dispatch(&mut self, event: SessionEvent) {
        debug!(%event, "dispatch: called");
        if matches!(
            event,
            SessionEvent::SubmitPreferences(_)
                | SessionEvent::ChatInput(_)
                | SessionEvent::ReadyForSuggestions
                | SessionEvent::ApproveSuggestions
                | SessionEvent::ApproveModified
                | SessionEvent::Regenerate
        ) {
            println!("{}", "Thinking...".dimmed());
        }

        match self.session.handle_event(event).await {
            Ok(transition) => self.show(&transition),
            Err(SessionError::Validation(e)) => println!("{} {}", "!".red(), e),
            Err(e) => {
                println!("{} {}", "?".yellow(), e);
                println!("{}", stage_hint(self.session.stage()).dimmed());
            }
        }
    }

    fn show(&mut self, transition: &Transition) {
        for notice in &transition.notices {
            println!("{} {}", "!".red(), notice.to_string().red());
        }

        if transition.moved() {
            println!();
            println!("{}", transition.to.title().bright_cyan().bold());
        }

        match transition.to {
            Stage::InitialInput => {
                self.draft = PreferenceSet::default();
                println!("{}", "Starting a new plan.".dimmed());
            }
            Stage::RefinePreferences | Stage::ModifySuggestions => {
                if let Some(turn) = self.session.conversation().last_assistant() {
                    println!("{}", turn.content);
                }
            }
            Stage::GenerateSuggestions => {
                println!("{}", self.session.suggestions().current_proposal());
            }
            Stage::GenerateItinerary => {
                let suggestions = self.session.suggestions();
                if suggestions.is_approved() && transition.moved() {
                    println!("{}", "Suggestions approved.".green());
                }
                if let Some(itinerary) = suggestions.itinerary() {
                    println!("{}", itinerary);
                }
            }
        }
        println!();
        println!("{}", stage_hint(transition.to).dimmed());
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} Move from refinement to suggestions", "/ready".yellow());
        println!("  {:16} Approve the suggestions shown", "/approve".yellow());
        println!("  {:16} Ask for changes to the suggestions", "/modify".yellow());
        println!("  {:16} Ask for another round of changes", "/more".yellow());
        println!("  {:16} Generate the suggestions or itinerary again", "/regenerate".yellow());
        println!("  {:16} Start over with a new plan", "/restart".yellow());
        println!("  {:16} Save the itinerary as a text file", "/export [dir]".yellow());
        println!("  {:16} Show conversation history", "/history".yellow());
        println!("  {:16} Show your trip preferences", "/prefs".yellow());
        println!("  {:16} Show the current stage", "/stage".yellow());
        println!("  {:16} Show this help", "/help".yellow());
        println!("  {:16} Exit", "/quit".yellow());
        println!();
    }

    fn print_history(&self) {
        let conversation = self.session.conversation();
        if conversation.is_empty() {
            println!("{}", "No conversation history.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for (i, turn) in conversation.turns().iter().enumerate() {
            let role = match turn.role {
                Role::User => "User".bright_green(),
                Role::Assistant => "Assistant".bright_blue(),
            };
            let preview: String = turn.content.chars().take(HISTORY_PREVIEW_CHARS).collect();
            let preview = preview.replace('\n', " ");
            if turn.content.chars().count() > HISTORY_PREVIEW_CHARS {
                println!("  {}. {}: {}...", i + 1, role, preview);
            } else {
                println!("  {}. {}: {}", i + 1, role, preview);
            }
        }
        println!();
    }

    fn print_prefs(&self) {
        let prefs = self.session.preferences();
        if prefs.destination.is_empty() {
            println!("{}", "No preferences submitted yet.".dimmed());
            return;
        }
        println!();
        for (label, value) in prefs.summary_lines() {
            println!("  {}: {}", label.bright_cyan(), value);
        }
        println!();
    }
}
