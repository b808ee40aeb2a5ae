use std::sync::Arc;
use chrono::NaiveDate;
use thiserror::Error;
use crate::core::{
    age::resolve_age,
    distance::distance_km,
    scoring::{age_score, distance_points, interest_score, preference_score, similarity_points},
    similarity::{GestaltSimilarity, StringSimilarity},
};
use crate::models::{
    Coordinates, LocationScore, MatchResult, Profile, ScoreBreakdown, ScoringWeights,
    DEFAULT_MAX_AGE_DIFF,
};
use crate::services::geocoder::{CoordinateLookup, NoLookup};

/// Errors raised while building a scorer or computing a score
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    #[error("Score is not a finite number: {0}")]
    NonFiniteScore(f64),
}

/// Weighted compatibility of two profiles
///
/// # Factors
/// 1. Interest overlap
/// 2. Age difference against the larger of the two tolerances
/// 3. Great-circle distance against the larger search radius, or address
///    similarity when either address cannot be resolved
/// 4. Positional agreement of partner preferences
///
/// The scorer is stateless apart from its injected lookup, so one instance
/// can serve concurrent callers.
#[derive(Clone)]
pub struct CompatibilityScorer {
    weights: ScoringWeights,
    default_max_age_diff: u32,
    lookup: Arc<dyn CoordinateLookup>,
    similarity: Arc<dyn StringSimilarity>,
}

impl CompatibilityScorer {
    pub fn new(
        weights: ScoringWeights,
        lookup: Arc<dyn CoordinateLookup>,
    ) -> Result<Self, ScoringError> {
        validate_weights(&weights)?;

        Ok(Self {
            weights,
            default_max_age_diff: DEFAULT_MAX_AGE_DIFF,
            lookup,
            similarity: Arc::new(GestaltSimilarity),
        })
    }

    /// Default weights with the given lookup
    pub fn with_lookup(lookup: Arc<dyn CoordinateLookup>) -> Self {
        Self {
            weights: ScoringWeights::default(),
            default_max_age_diff: DEFAULT_MAX_AGE_DIFF,
            lookup,
            similarity: Arc::new(GestaltSimilarity),
        }
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn StringSimilarity>) -> Self {
        self.similarity = similarity;
        self
    }

    /// Tolerance used for profiles without `max_age_diff`
    pub fn with_default_max_age_diff(mut self, max_age_diff: u32) -> Self {
        self.default_max_age_diff = max_age_diff;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score two profiles as of today (UTC)
    pub fn score(&self, a: &Profile, b: &Profile) -> Result<MatchResult, ScoringError> {
        self.score_on(a, b, chrono::Utc::now().date_naive())
    }

    /// Score two profiles, resolving birthdays against `today`
    pub fn score_on(
        &self,
        a: &Profile,
        b: &Profile,
        today: NaiveDate,
    ) -> Result<MatchResult, ScoringError> {
        let interests = interest_score(&a.interests, &b.interests, self.weights.interests);

        let max_age_diff = a
            .max_age_diff
            .unwrap_or(self.default_max_age_diff)
            .max(b.max_age_diff.unwrap_or(self.default_max_age_diff));
        let age = age_score(
            resolve_age(a, today),
            resolve_age(b, today),
            max_age_diff,
            self.weights.age,
        );

        let location = self.location_score(a, b);

        let preferences = preference_score(&a.preferences, &b.preferences, self.weights.preferences);

        let breakdown = ScoreBreakdown {
            interests,
            age,
            location,
            preferences,
        };

        let total = breakdown.total();
        if !total.is_finite() {
            return Err(ScoringError::NonFiniteScore(total));
        }

        tracing::debug!(
            "Sub-scores: interests={:.1} age={:.1} location={:.1} ({:?}) preferences={:.1}",
            breakdown.interests.points,
            breakdown.age.points,
            breakdown.location.points,
            breakdown.location.method,
            breakdown.preferences.points
        );

        Ok(MatchResult {
            score: total.clamp(0.0, 100.0),
            details: breakdown.describe(&self.weights),
            breakdown,
        })
    }

    fn location_score(&self, a: &Profile, b: &Profile) -> LocationScore {
        let weight = self.weights.location;
        let resolved = self
            .resolve(&a.location.address)
            .zip(self.resolve(&b.location.address));

        if let Some((from, to)) = resolved {
            let distance = distance_km(&from, &to);
            let max_radius = a.location.search_radius.max(b.location.search_radius);

            match distance_points(distance, max_radius, weight) {
                Some(points) => return LocationScore::by_distance(points, distance),
                None => {
                    tracing::debug!("Zero search radius, scoring location by address similarity");
                    return LocationScore::by_similarity(self.address_points(a, b), Some(distance));
                }
            }
        }

        LocationScore::by_similarity(self.address_points(a, b), None)
    }

    fn address_points(&self, a: &Profile, b: &Profile) -> f64 {
        let ratio = self.similarity.similarity(
            &a.location.address.to_lowercase(),
            &b.location.address.to_lowercase(),
        );
        similarity_points(ratio, self.weights.location)
    }

    fn resolve(&self, address: &str) -> Option<Coordinates> {
        if address.trim().is_empty() {
            return None;
        }

        match self.lookup.lookup(address) {
            Ok(Some(coordinates)) if coordinates.is_valid() => Some(coordinates),
            Ok(Some(coordinates)) => {
                tracing::warn!(
                    "Lookup returned invalid coordinates for {:?}: ({}, {})",
                    address,
                    coordinates.latitude,
                    coordinates.longitude
                );
                None
            }
            Ok(None) => {
                tracing::debug!("No coordinates found for {:?}", address);
                None
            }
            Err(e) => {
                tracing::warn!("Coordinate lookup failed for {:?}: {}", address, e);
                None
            }
        }
    }
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::with_lookup(Arc::new(NoLookup))
    }
}

impl std::fmt::Debug for CompatibilityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompatibilityScorer")
            .field("weights", &self.weights)
            .field("default_max_age_diff", &self.default_max_age_diff)
            .finish_non_exhaustive()
    }
}

fn validate_weights(weights: &ScoringWeights) -> Result<(), ScoringError> {
    let all = [weights.interests, weights.age, weights.location, weights.preferences];
    if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ScoringError::InvalidWeights(format!(
            "weights must be finite and non-negative, got {:?}",
            weights
        )));
    }

    let total = weights.total();
    if (total - 100.0).abs() > 1e-6 {
        return Err(ScoringError::InvalidWeights(format!(
            "weights must sum to 100, got {}",
            total
        )));
    }

    Ok(())
}
