// Core algorithm exports
pub mod age;
pub mod distance;
pub mod scorer;
pub mod scoring;
pub mod similarity;

pub use age::{age_on, parse_birthday, resolve_age};
pub use distance::{distance_km, haversine_distance};
pub use scorer::{CompatibilityScorer, ScoringError};
pub use scoring::{age_score, interest_score, preference_score};
pub use similarity::{gestalt_ratio, GestaltSimilarity, StringSimilarity};
