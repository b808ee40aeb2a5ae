//! LoveFi Match - compatibility scoring for LoveFi dating matches
//!
//! This library scores how well two profiles fit together on a 0-100 scale,
//! combining interest overlap, age difference, distance and partner
//! preferences, and explains the result line by line.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{CompatibilityScorer, ScoringError, distance::haversine_distance};
pub use models::{Profile, Preference, Location, PersonalInfo, MatchResult, ScoringWeights, MatchRequest, MatchResponse};
pub use services::{CoordinateLookup, StaticGazetteer};
