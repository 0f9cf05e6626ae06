//! Preference form walked field by field in the terminal

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::domain::{
    AccommodationType, Budget, Choice, DietaryPreference, EndTime, Interest, MobilityConcern, PreferenceSet, StartTime,
    TripDuration, TripPurpose,
};

/// Inputs that clear a field that was set in an earlier form walk
const CLEAR_TOKENS: [&str; 2] = ["-", "none"];

/// Returns true if the input asks to clear the field
pub fn is_clear_token(input: &str) -> bool {
    let input = input.trim();
    CLEAR_TOKENS.iter().any(|t| input.eq_ignore_ascii_case(t))
}

/// Resolve one line of input for an optional choice field
///
/// Blank keeps `current`, a clear token unsets it, anything else must parse.
pub fn resolve_choice<T: Choice>(input: &str, current: Option<T>) -> Result<Option<T>, String> {
    if input.trim().is_empty() {
        return Ok(current);
    }
    if is_clear_token(input) {
        return Ok(None);
    }
    T::parse_choice(input).map(Some)
}

/// Parse a comma-separated list of interests (labels or numbers)
///
/// Interest labels contain no commas, so splitting on them is unambiguous.
pub fn parse_interests(input: &str) -> Result<Vec<Interest>, String> {
    let mut interests = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let interest = Interest::parse_choice(part)?;
        if !interests.contains(&interest) {
            interests.push(interest);
        }
    }
    Ok(interests)
}

/// Numbered option list for one choice type
pub fn numbered_options<T: Choice>() -> String {
    T::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("  {:>2}. {}", i + 1, c.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn hour_options<T: std::fmt::Display>(options: impl Iterator<Item = T>) -> String {
    options.map(|o| o.to_string()).collect::<Vec<_>>().join(", ")
}

/// Every choice set, as printed by `tp choices`
pub fn choice_listing() -> String {
    let sections = [
        ("Budget Range", numbered_options::<Budget>()),
        ("Trip Duration", numbered_options::<TripDuration>()),
        ("Purpose of Trip", numbered_options::<TripPurpose>()),
        ("Interests", numbered_options::<Interest>()),
        ("Dietary Preferences", numbered_options::<DietaryPreference>()),
        ("Mobility Concerns", numbered_options::<MobilityConcern>()),
        ("Accommodation Type", numbered_options::<AccommodationType>()),
        ("Daily Start Time", format!("  {}", hour_options(StartTime::options()))),
        ("Daily End Time", format!("  {}", hour_options(EndTime::options()))),
    ];
    sections
        .iter()
        .map(|(title, body)| format!("{}:\n{}", title, body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Reads one form field at a time
pub struct FormReader<'a> {
    rl: &'a mut DefaultEditor,
}

impl<'a> FormReader<'a> {
    pub fn new(rl: &'a mut DefaultEditor) -> Self {
        Self { rl }
    }

    /// Walk the whole form, starting from `initial`
    ///
    /// Returns `None` if the user cancels with Ctrl+C or Ctrl+D.
    pub fn read(&mut self, initial: &PreferenceSet) -> Result<Option<PreferenceSet>> {
        println!();
        println!("{}", "Enter a number or a label; leave blank to keep the current value, '-' to clear it.".dimmed());

        let mut prefs = initial.clone();
        macro_rules! field {
            ($e:expr) => {
                match $e? {
                    Some(v) => v,
                    None => return Ok(None),
                }
            };
        }

        prefs.budget = field!(self.choice::<Budget>("Budget Range", prefs.budget));
        prefs.duration = field!(self.choice::<TripDuration>("Trip Duration", prefs.duration));
        prefs.destination = field!(self.text("Destination", &prefs.destination));
        prefs.starting_location = field!(self.text("Starting Location", &prefs.starting_location));
        prefs.purpose = field!(self.choice::<TripPurpose>("Purpose of Trip", prefs.purpose));
        prefs.interests = field!(self.interests(&prefs.interests));
        prefs.dietary_preference = field!(self.choice::<DietaryPreference>("Dietary Preferences", prefs.dietary_preference));
        prefs.mobility_concern = field!(self.choice::<MobilityConcern>("Mobility Concerns", prefs.mobility_concern));
        prefs.accommodation_preference =
            field!(self.choice::<AccommodationType>("Accommodation Type", prefs.accommodation_preference));
        prefs.start_time = field!(self.hour::<StartTime>("Daily Start Time", prefs.start_time, StartTime::options()));
        prefs.end_time = field!(self.hour::<EndTime>("Daily End Time", prefs.end_time, EndTime::options()));

        Ok(Some(prefs))
    }

    /// Read one line; `None` on cancel
    fn line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.rl.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }

    fn label(title: &str, current: &str) -> String {
        if current.is_empty() {
            format!("{}: ", title.bright_cyan())
        } else {
            format!("{} [{}]: ", title.bright_cyan(), current)
        }
    }

    fn text(&mut self, title: &str, current: &str) -> Result<Option<String>> {
        let Some(line) = self.line(&Self::label(title, current))? else {
            return Ok(None);
        };
        let line = line.trim();
        Ok(Some(if line.is_empty() {
            current.to_string()
        } else if is_clear_token(line) {
            String::new()
        } else {
            line.to_string()
        }))
    }

    fn choice<T: Choice>(&mut self, title: &str, current: Option<T>) -> Result<Option<Option<T>>> {
        println!("{}", numbered_options::<T>().dimmed());
        let shown = current.map(|c| c.label()).unwrap_or("");
        loop {
            let Some(line) = self.line(&Self::label(title, shown))? else {
                return Ok(None);
            };
            match resolve_choice::<T>(&line, current) {
                Ok(choice) => return Ok(Some(choice)),
                Err(e) => println!("{} {}", "?".yellow(), e),
            }
        }
    }

    fn interests(&mut self, current: &[Interest]) -> Result<Option<Vec<Interest>>> {
        println!("{}", numbered_options::<Interest>().dimmed());
        let shown = current.iter().map(|i| i.label()).collect::<Vec<_>>().join(", ");
        loop {
            let Some(line) = self.line(&Self::label("Interests (comma-separated)", &shown))? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                return Ok(Some(current.to_vec()));
            }
            if is_clear_token(&line) {
                return Ok(Some(Vec::new()));
            }
            match parse_interests(&line) {
                Ok(interests) => return Ok(Some(interests)),
                Err(e) => println!("{} {}", "?".yellow(), e),
            }
        }
    }

    fn hour<T>(&mut self, title: &str, current: T, options: impl Iterator<Item = T>) -> Result<Option<T>>
    where
        T: std::str::FromStr<Err = String> + std::fmt::Display + Copy,
    {
        println!("  {}", hour_options(options).dimmed());
        loop {
            let Some(line) = self.line(&Self::label(title, &current.to_string()))? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                return Ok(Some(current));
            }
            match line.parse::<T>() {
                Ok(hour) => return Ok(Some(hour)),
                Err(e) => println!("{} {}", "?".yellow(), e),
            }
        }
    }
}
