use serde::{Deserialize, Serialize};
use validator::Validate;

/// Search radius used when a location does not specify one
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 10.0;

/// Age tolerance used when a profile does not specify one
pub const DEFAULT_MAX_AGE_DIFF: u32 = 10;

/// Identity block of a profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonalInfo {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// ISO-8601 date or datetime; empty when unknown
    #[serde(default)]
    pub birthday: String,
}

impl PersonalInfo {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthday: String::new(),
        }
    }

    /// "First Last", without a trailing space when the last name is empty
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Free-text location plus the radius (km) the person is willing to search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    #[serde(default)]
    #[validate(length(max = 256))]
    pub address: String,
    #[serde(default = "default_search_radius")]
    #[validate(range(min = 0.0))]
    pub search_radius: f64,
}

impl Location {
    pub fn new(address: impl Into<String>, search_radius: f64) -> Self {
        Self {
            address: address.into(),
            search_radius,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            address: String::new(),
            search_radius: DEFAULT_SEARCH_RADIUS_KM,
        }
    }
}

fn default_search_radius() -> f64 {
    DEFAULT_SEARCH_RADIUS_KM
}

/// One answered partner-preference question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub selected_index: usize,
    pub selected_option: String,
}

impl Preference {
    /// Build a preference whose selection is taken from `options[selected_index]`.
    ///
    /// Returns `None` when the index is out of range.
    pub fn select(
        category: impl Into<String>,
        question: impl Into<String>,
        options: Vec<String>,
        selected_index: usize,
    ) -> Option<Self> {
        let selected_option = options.get(selected_index)?.clone();
        Some(Self {
            category: category.into(),
            question: question.into(),
            options,
            selected_index,
            selected_option,
        })
    }

    /// Whether `selected_option` agrees with `options[selected_index]`
    pub fn is_consistent(&self) -> bool {
        self.options.get(self.selected_index) == Some(&self.selected_option)
    }
}

/// Everything the scorer knows about one person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub gender: Option<String>,
    /// Age given directly; takes precedence over the birthday
    #[serde(default)]
    pub age: Option<i32>,
    /// Largest age difference this person tolerates
    #[serde(default)]
    pub max_age_diff: Option<u32>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
}

impl Profile {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            personal_info: PersonalInfo::new(first_name, last_name),
            ..Default::default()
        }
    }

    pub fn with_birthday(mut self, birthday: impl Into<String>) -> Self {
        self.personal_info.birthday = birthday.into();
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_max_age_diff(mut self, max_age_diff: u32) -> Self {
        self.max_age_diff = Some(max_age_diff);
        self
    }

    pub fn with_location(mut self, address: impl Into<String>, search_radius: f64) -> Self {
        self.location = Location::new(address, search_radius);
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_preferences(mut self, preferences: Vec<Preference>) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn full_name(&self) -> String {
        self.personal_info.full_name()
    }
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite and within [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Points available to each factor. The defaults sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub interests: f64,
    pub age: f64,
    pub location: f64,
    pub preferences: f64,
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.interests + self.age + self.location + self.preferences
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 40.0,
            age: 20.0,
            location: 20.0,
            preferences: 20.0,
        }
    }
}

/// How the location factor was computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMethod {
    /// Both addresses resolved; scored by great-circle distance
    Distance,
    /// At least one address unresolved; scored by address text similarity
    AddressSimilarity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestScore {
    pub points: f64,
    pub common: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeScore {
    pub points: f64,
    /// Absolute difference in years; `None` when either age is unknown
    pub difference: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationScore {
    pub points: f64,
    pub distance_km: Option<f64>,
    pub method: LocationMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceScore {
    pub points: f64,
    pub matching: usize,
    pub total: usize,
}

/// Per-factor view of a score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub interests: InterestScore,
    pub age: AgeScore,
    pub location: LocationScore,
    pub preferences: PreferenceScore,
}

/// Outcome of scoring two profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Always within [0, 100]
    pub score: f64,
    /// The four factor lines joined with "; "
    pub details: String,
    pub breakdown: ScoreBreakdown,
}
