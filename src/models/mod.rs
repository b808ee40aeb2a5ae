// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeScore, Coordinates, InterestScore, Location, LocationMethod, LocationScore, MatchResult,
    PersonalInfo, Preference, PreferenceScore, Profile, ScoreBreakdown, ScoringWeights,
    DEFAULT_MAX_AGE_DIFF, DEFAULT_SEARCH_RADIUS_KM,
};
pub use requests::{MatchRequest, SimpleMatchRequest, SimplePreferences};
pub use responses::{ErrorResponse, HealthResponse, MatchResponse};
