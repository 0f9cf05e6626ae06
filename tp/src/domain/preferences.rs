//! PreferenceSet and its enumerated choice types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A closed set of user-selectable values with human-readable labels
///
/// Labels are what the form shows and what ends up verbatim in prompts.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Every value, in form display order
    const ALL: &'static [Self];

    /// Form field name used in messages
    const FIELD: &'static str;

    /// Human-readable label
    fn label(&self) -> &'static str;

    /// Find a value by label, ignoring ASCII case and surrounding whitespace
    fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.iter().copied().find(|c| c.label().eq_ignore_ascii_case(s))
    }

    /// Find a value by its 1-based position in [`Choice::ALL`]
    fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Parse either a label or a 1-based index
    fn parse_choice(s: &str) -> Result<Self, String> {
        if let Some(choice) = Self::from_label(s) {
            return Ok(choice);
        }
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| format!("Unknown {}: '{}'", Self::FIELD, s.trim()))
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const FIELD: &'static str = $field;

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_choice(s)
            }
        }
    };
}

choice_enum! {
    /// Total trip budget range
    Budget, "budget" {
        Under40k => "Under ₹40,000",
        From40kTo80k => "₹40,000 - ₹80,000",
        From80kTo160k => "₹80,000 - ₹1,60,000",
        From160kTo240k => "₹1,60,000 - ₹2,40,000",
        From240kTo400k => "₹2,40,000 - ₹4,00,000",
        Above400k => "Above ₹4,00,000",
    }
}

choice_enum! {
    /// Trip length range
    TripDuration, "duration" {
        OneToTwoDays => "1-2 days",
        ThreeToFourDays => "3-4 days",
        FiveToSevenDays => "5-7 days",
        OneToTwoWeeks => "1-2 weeks",
        TwoPlusWeeks => "2+ weeks",
    }
}

choice_enum! {
    /// Primary purpose of the trip
    TripPurpose, "purpose" {
        Relaxation => "Relaxation",
        Adventure => "Adventure",
        CulturalExperience => "Cultural Experience",
        FoodAndCuisine => "Food & Cuisine",
        Business => "Business",
        FamilyVacation => "Family Vacation",
        RomanticGetaway => "Romantic Getaway",
        ShoppingAndEntertainment => "Shopping & Entertainment",
    }
}

choice_enum! {
    /// Activity interest; a trip may have any number of these
    Interest, "interest" {
        MuseumsAndHistory => "Museums & History",
        NatureAndOutdoors => "Nature & Outdoors",
        FoodAndDining => "Food & Dining",
        Shopping => "Shopping",
        ArtAndCulture => "Art & Culture",
        AdventureSports => "Adventure Sports",
        BeachesAndWater => "Beaches & Water Activities",
        Nightlife => "Nightlife & Entertainment",
        LocalMarkets => "Local Markets",
        Photography => "Photography",
    }
}

choice_enum! {
    /// Dietary restriction for meal recommendations
    DietaryPreference, "dietary preference" {
        NoRestrictions => "No Restrictions",
        Vegetarian => "Vegetarian",
        Vegan => "Vegan",
        Halal => "Halal",
        Kosher => "Kosher",
        GlutenFree => "Gluten-Free",
        DairyFree => "Dairy-Free",
        Other => "Other",
    }
}

choice_enum! {
    /// Mobility requirement for activity planning
    MobilityConcern, "mobility concern" {
        NoRestrictions => "No Restrictions",
        PreferShortWalks => "Prefer Short Walks",
        WheelchairAccessible => "Wheelchair Accessible",
        MinimalWalking => "Minimal Walking Required",
        NoStairs => "No Stairs Preferred",
    }
}

choice_enum! {
    /// Preferred type of accommodation
    AccommodationType, "accommodation" {
        LuxuryHotel => "Luxury Hotel",
        MidRangeHotel => "Mid-range Hotel",
        BudgetHotel => "Budget Hotel",
        Hostel => "Hostel",
        VacationRental => "Vacation Rental",
        BoutiqueHotel => "Boutique Hotel",
        Resort => "Resort",
        BedAndBreakfast => "Bed & Breakfast",
    }
}

macro_rules! hour_slot {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, $min:literal..=$max:literal, default $default:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(u8);

        impl $name {
            /// Earliest selectable hour
            pub const MIN: u8 = $min;
            /// Latest selectable hour
            pub const MAX: u8 = $max;

            /// Create a slot for `hour`, or None if it is out of range
            pub fn new(hour: u8) -> Option<Self> {
                (Self::MIN..=Self::MAX).contains(&hour).then_some(Self(hour))
            }

            /// Hour of day (24h clock)
            pub fn hour(&self) -> u8 {
                self.0
            }

            /// Every selectable slot in order
            pub fn options() -> impl Iterator<Item = Self> {
                (Self::MIN..=Self::MAX).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:02}:00", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            /// Accepts "HH:00" or a bare hour ("9", "09")
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let hour = s.strip_suffix(":00").unwrap_or(s);
                hour.parse::<u8>()
                    .ok()
                    .and_then(Self::new)
                    .ok_or_else(|| {
                        format!(
                            "Invalid {}: '{}' (expected {:02}:00 to {:02}:00)",
                            $field,
                            s,
                            Self::MIN,
                            Self::MAX
                        )
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_string()
            }
        }
    };
}

hour_slot! {
    /// Daily start time, hourly from 05:00 to 12:00
    StartTime, "start time", 5..=12, default 9
}

hour_slot! {
    /// Daily end time, hourly from 13:00 to 23:00
    EndTime, "end time", 13..=23, default 21
}

/// Preference fields that must be filled before leaving the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
    Budget,
    Duration,
    Destination,
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Budget => write!(f, "budget"),
            Self::Duration => write!(f, "duration"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// The preference form failed its required-field check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in these required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    /// Every missing required field, in form order
    pub missing: Vec<RequiredField>,
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", ")
}

/// Structured trip parameters collected from the user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PreferenceSet {
    pub budget: Option<Budget>,
    pub duration: Option<TripDuration>,
    pub destination: String,
    pub starting_location: String,
    pub purpose: Option<TripPurpose>,
    pub interests: Vec<Interest>,
    pub dietary_preference: Option<DietaryPreference>,
    pub mobility_concern: Option<MobilityConcern>,
    pub accommodation_preference: Option<AccommodationType>,
    pub start_time: StartTime,
    pub end_time: EndTime,
}

impl PreferenceSet {
    /// Required fields that are still empty, in form order
    pub fn missing_required(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.budget.is_none() {
            missing.push(RequiredField::Budget);
        }
        if self.duration.is_none() {
            missing.push(RequiredField::Duration);
        }
        if self.destination.trim().is_empty() {
            missing.push(RequiredField::Destination);
        }
        missing
    }

    /// Check the required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Add an interest, keeping the set free of duplicates
    pub fn add_interest(&mut self, interest: Interest) {
        if !self.interests.contains(&interest) {
            self.interests.push(interest);
        }
    }

    /// Selected interests in first-seen order, duplicates dropped
    ///
    /// `interests` is public, so direct construction or YAML input may repeat a value.
    pub fn distinct_interests(&self) -> Vec<Interest> {
        let mut distinct = Vec::with_capacity(self.interests.len());
        for interest in &self.interests {
            if !distinct.contains(interest) {
                distinct.push(*interest);
            }
        }
        distinct
    }

    /// Interests joined for display and prompts; empty if none selected
    pub fn interests_label(&self) -> String {
        self.distinct_interests()
            .iter()
            .map(|i| i.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `Label: value` pairs for every non-empty preference, in form order
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        let fields = [
            ("Budget", label_of(self.budget)),
            ("Duration", label_of(self.duration)),
            ("Destination", self.destination.trim().to_string()),
            ("Starting Location", self.starting_location.trim().to_string()),
            ("Purpose", label_of(self.purpose)),
            ("Interests", self.interests_label()),
            ("Dietary Preferences", label_of(self.dietary_preference)),
            ("Mobility Concerns", label_of(self.mobility_concern)),
            ("Accommodation Preferences", label_of(self.accommodation_preference)),
            ("Start Time", self.start_time.to_string()),
            ("End Time", self.end_time.to_string()),
        ];
        fields.into_iter().filter(|(_, value)| !value.is_empty()).collect()
    }

    /// Newline-separated `Label: value` summary of the filled-in preferences
    pub fn summary(&self) -> String {
        self.summary_lines()
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Label of an optional choice, or an empty string when unset
pub(crate) fn label_of<T: Choice>(choice: Option<T>) -> String {
    choice.map(|c| c.label().to_string()).unwrap_or_default()
}
