use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Location, PersonalInfo, Preference, Profile, DEFAULT_MAX_AGE_DIFF};

/// Request to score two fully described profiles
///
/// Field names follow the `MatchRequest` payload the agents exchanged, so
/// existing clients can post the same JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(nested)]
    pub personal_info1: PersonalInfo,
    #[serde(default)]
    pub gender1: String,
    #[validate(nested)]
    #[serde(default)]
    pub location1: Location,
    #[serde(default)]
    pub personal_interests1: Vec<String>,
    #[validate(custom(function = "validate_preferences"))]
    #[serde(default)]
    pub partner_preferences1: Vec<Preference>,

    #[validate(nested)]
    pub personal_info2: PersonalInfo,
    #[serde(default)]
    pub gender2: String,
    #[validate(nested)]
    #[serde(default)]
    pub location2: Location,
    #[serde(default)]
    pub personal_interests2: Vec<String>,
    #[validate(custom(function = "validate_preferences"))]
    #[serde(default)]
    pub partner_preferences2: Vec<Preference>,
}

impl MatchRequest {
    pub fn into_profiles(self) -> (Profile, Profile) {
        let first = Profile {
            personal_info: self.personal_info1,
            gender: non_empty(self.gender1),
            age: None,
            max_age_diff: None,
            location: self.location1,
            interests: self.personal_interests1,
            preferences: self.partner_preferences1,
        };
        let second = Profile {
            personal_info: self.personal_info2,
            gender: non_empty(self.gender2),
            age: None,
            max_age_diff: None,
            location: self.location2,
            interests: self.personal_interests2,
            preferences: self.partner_preferences2,
        };
        (first, second)
    }
}

/// Per-person knobs accepted by the simple endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplePreferences {
    #[serde(default)]
    pub max_age_diff: Option<u32>,
}

/// Request to score two people described by name, age, interests and a city
///
/// Ages are limited to 0..=150 and addresses to 256 characters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimpleMatchRequest {
    #[validate(length(min = 1))]
    pub name1: String,
    #[validate(range(min = 0, max = 150))]
    #[serde(default)]
    pub age1: Option<i32>,
    #[serde(default)]
    pub interests1: Vec<String>,
    #[validate(length(max = 256))]
    #[serde(default)]
    pub location1: String,
    #[serde(default)]
    pub preferences1: Option<SimplePreferences>,

    #[validate(length(min = 1))]
    pub name2: String,
    #[validate(range(min = 0, max = 150))]
    #[serde(default)]
    pub age2: Option<i32>,
    #[serde(default)]
    pub interests2: Vec<String>,
    #[validate(length(max = 256))]
    #[serde(default)]
    pub location2: String,
    #[serde(default)]
    pub preferences2: Option<SimplePreferences>,
}

impl SimpleMatchRequest {
    /// Build the two profiles, placing both at `search_radius_km`
    pub fn into_profiles(self, search_radius_km: f64) -> (Profile, Profile) {
        let first = simple_profile(
            &self.name1,
            self.age1,
            self.interests1,
            self.location1,
            self.preferences1,
            search_radius_km,
        );
        let second = simple_profile(
            &self.name2,
            self.age2,
            self.interests2,
            self.location2,
            self.preferences2,
            search_radius_km,
        );
        (first, second)
    }
}

fn simple_profile(
    name: &str,
    age: Option<i32>,
    interests: Vec<String>,
    address: String,
    preferences: Option<SimplePreferences>,
    search_radius_km: f64,
) -> Profile {
    let (first_name, last_name) = split_name(name);
    let max_age_diff = preferences
        .and_then(|p| p.max_age_diff)
        .unwrap_or(DEFAULT_MAX_AGE_DIFF);

    Profile {
        personal_info: PersonalInfo::new(first_name, last_name),
        gender: None,
        age,
        max_age_diff: Some(max_age_diff),
        location: Location::new(address, search_radius_km),
        interests,
        preferences: Vec::new(),
    }
}

/// First whitespace token is the first name, the last token (if distinct) the last name
fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("Unknown").to_string();
    let last = parts.last().unwrap_or("").to_string();
    (first, last)
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn validate_preferences(preferences: &Vec<Preference>) -> Result<(), ValidationError> {
    if preferences.iter().all(Preference::is_consistent) {
        return Ok(());
    }

    let mut error = ValidationError::new("inconsistent_selection");
    error.message = Some("selected_option must equal options[selected_index]".into());
    Err(error)
}
