use std::collections::HashSet;
use crate::models::{
    AgeScore, InterestScore, LocationMethod, LocationScore, Preference, PreferenceScore,
    ScoreBreakdown, ScoringWeights,
};

/// Interest overlap
///
/// score = |set(a) ∩ set(b)| / max(len(a), len(b), 1) * weight
///
/// Tags are matched exactly (case-sensitive). The denominator counts list
/// entries, so duplicated tags dilute the score.
pub fn interest_score(a: &[String], b: &[String], weight: f64) -> InterestScore {
    let theirs: HashSet<&str> = b.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let common: Vec<String> = a
        .iter()
        .filter(|interest| theirs.contains(interest.as_str()))
        .filter(|interest| seen.insert(interest.as_str()))
        .cloned()
        .collect();

    let denominator = a.len().max(b.len()).max(1) as f64;

    InterestScore {
        points: common.len() as f64 / denominator * weight,
        common,
    }
}

/// Age closeness
///
/// With both ages known: max(0, 1 - |diff| / max_age_diff) * weight, or the
/// full weight when the tolerance is zero. Unknown ages score half the weight.
pub fn age_score(age_a: Option<i32>, age_b: Option<i32>, max_age_diff: u32, weight: f64) -> AgeScore {
    let (Some(a), Some(b)) = (age_a, age_b) else {
        return AgeScore {
            points: weight / 2.0,
            difference: None,
        };
    };

    let difference = a.abs_diff(b);
    let points = if max_age_diff == 0 {
        weight
    } else {
        (1.0 - difference as f64 / max_age_diff as f64).max(0.0) * weight
    };

    AgeScore {
        points,
        difference: Some(difference),
    }
}

/// Distance-based location points
///
/// Returns `None` when the linear falloff is undefined (a zero radius with
/// both points at the same spot); callers fall back to address similarity.
pub fn distance_points(distance_km: f64, max_radius_km: f64, weight: f64) -> Option<f64> {
    if distance_km > max_radius_km {
        return Some(0.0);
    }
    if max_radius_km <= 0.0 {
        return None;
    }

    Some(weight * (1.0 - distance_km / max_radius_km))
}

/// Location points from a similarity ratio in [0, 1]
pub fn similarity_points(ratio: f64, weight: f64) -> f64 {
    ratio.clamp(0.0, 1.0) * weight
}

impl LocationScore {
    pub fn by_distance(points: f64, distance_km: f64) -> Self {
        Self {
            points,
            distance_km: Some(distance_km),
            method: LocationMethod::Distance,
        }
    }

    pub fn by_similarity(points: f64, distance_km: Option<f64>) -> Self {
        Self {
            points,
            distance_km,
            method: LocationMethod::AddressSimilarity,
        }
    }
}

/// Position-by-position agreement of selected options
///
/// Only the first min(len(a), len(b)) entries are compared. No comparable
/// entries scores zero.
pub fn preference_score(a: &[Preference], b: &[Preference], weight: f64) -> PreferenceScore {
    let total = a.len().min(b.len());
    let matching = a
        .iter()
        .zip(b)
        .filter(|(mine, theirs)| mine.selected_option == theirs.selected_option)
        .count();

    let points = if total > 0 {
        matching as f64 / total as f64 * weight
    } else {
        0.0
    };

    PreferenceScore {
        points,
        matching,
        total,
    }
}

impl ScoreBreakdown {
    /// Sum of the factor points, before clamping
    pub fn total(&self) -> f64 {
        self.interests.points + self.age.points + self.location.points + self.preferences.points
    }

    /// One line per factor, joined with "; "
    pub fn describe(&self, weights: &ScoringWeights) -> String {
        let common = if self.interests.common.is_empty() {
            "None".to_string()
        } else {
            self.interests.common.join(", ")
        };
        let age = match self.age.difference {
            Some(years) => format!("{} years", years),
            None => "Unknown".to_string(),
        };
        let distance = match self.location.distance_km {
            Some(km) => format!("{:.1} km", km),
            None => "Unknown".to_string(),
        };

        [
            format!(
                "Interest compatibility: {:.1}/{} (Common interests: {})",
                self.interests.points, weights.interests, common
            ),
            format!(
                "Age compatibility: {:.1}/{} (Age difference: {})",
                self.age.points, weights.age, age
            ),
            format!(
                "Location compatibility: {:.1}/{} (Distance: {})",
                self.location.points, weights.location, distance
            ),
            format!(
                "Preference compatibility: {:.1}/{} (Matching preferences: {}/{})",
                self.preferences.points, weights.preferences, self.preferences.matching, self.preferences.total
            ),
        ]
        .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn pref(selected: &str) -> Preference {
        Preference {
            category: "lifestyle".to_string(),
            question: "Pace?".to_string(),
            options: tags(&["quiet", "active", "balanced"]),
            selected_index: 0,
            selected_option: selected.to_string(),
        }
    }

    #[test]
    fn test_interest_full_overlap() {
        let a = tags(&["reading", "hiking", "cooking"]);
        let score = interest_score(&a, &a, 40.0);
        assert_eq!(score.points, 40.0);
        assert_eq!(score.common, a);
    }

    #[test]
    fn test_interest_partial_overlap_uses_longer_list() {
        let a = tags(&["music", "travel", "food", "movies"]);
        let b = tags(&["music", "food"]);
        let score = interest_score(&a, &b, 40.0);
        assert_eq!(score.points, 20.0);
        assert_eq!(score.common, tags(&["music", "food"]));
    }

    #[test]
    fn test_interest_case_sensitive() {
        let score = interest_score(&tags(&["Hiking"]), &tags(&["hiking"]), 40.0);
        assert_eq!(score.points, 0.0);
        assert!(score.common.is_empty());
    }

    #[test]
    fn test_interest_duplicates_dilute() {
        let a = tags(&["music", "music"]);
        let b = tags(&["music"]);
        let score = interest_score(&a, &b, 40.0);
        assert_eq!(score.common, tags(&["music"]));
        assert_eq!(score.points, 20.0);
    }

    #[test]
    fn test_interest_both_empty() {
        let score = interest_score(&[], &[], 40.0);
        assert_eq!(score.points, 0.0);
    }

    #[test]
    fn test_age_within_tolerance() {
        let score = age_score(Some(25), Some(26), 5, 20.0);
        assert!((score.points - 16.0).abs() < 1e-9);
        assert_eq!(score.difference, Some(1));
    }

    #[test]
    fn test_age_beyond_tolerance_floors_at_zero() {
        let score = age_score(Some(22), Some(35), 5, 20.0);
        assert_eq!(score.points, 0.0);
        assert_eq!(score.difference, Some(13));
    }

    #[test]
    fn test_age_unknown_is_neutral() {
        assert_eq!(age_score(None, Some(30), 10, 20.0).points, 10.0);
        assert_eq!(age_score(Some(30), None, 10, 20.0).difference, None);
    }

    #[test]
    fn test_age_extreme_values_do_not_overflow() {
        let score = age_score(Some(i32::MAX), Some(-1), 10, 20.0);
        assert_eq!(score.points, 0.0);
        assert_eq!(score.difference, Some(2_147_483_648));

        let score = age_score(Some(i32::MIN), Some(i32::MAX), 10, 20.0);
        assert_eq!(score.points, 0.0);
        assert_eq!(score.difference, Some(u32::MAX));
    }

    #[test]
    fn test_age_zero_tolerance_gives_full_points() {
        assert_eq!(age_score(Some(20), Some(60), 0, 20.0).points, 20.0);
    }

    #[test]
    fn test_distance_points() {
        assert_eq!(distance_points(0.0, 10.0, 20.0), Some(20.0));
        assert_eq!(distance_points(5.0, 10.0, 20.0), Some(10.0));
        assert_eq!(distance_points(10.0, 10.0, 20.0), Some(0.0));
        assert_eq!(distance_points(11.0, 10.0, 20.0), Some(0.0));
        assert_eq!(distance_points(0.0, 0.0, 20.0), None);
        assert_eq!(distance_points(3.0, 0.0, 20.0), Some(0.0));
    }

    #[test]
    fn test_preference_positional_match() {
        let a = vec![pref("quiet"), pref("active"), pref("balanced")];
        let b = vec![pref("quiet"), pref("balanced")];
        let score = preference_score(&a, &b, 20.0);
        assert_eq!(score.total, 2);
        assert_eq!(score.matching, 1);
        assert_eq!(score.points, 10.0);
    }

    #[test]
    fn test_preference_empty_scores_zero() {
        let score = preference_score(&[], &[pref("quiet")], 20.0);
        assert_eq!(score.points, 0.0);
        assert_eq!(score.total, 0);
    }

    #[test]
    fn test_describe_format() {
        let breakdown = ScoreBreakdown {
            interests: InterestScore {
                points: 40.0,
                common: tags(&["reading", "hiking"]),
            },
            age: AgeScore {
                points: 10.0,
                difference: None,
            },
            location: LocationScore::by_distance(12.345, 3.21),
            preferences: PreferenceScore {
                points: 0.0,
                matching: 0,
                total: 0,
            },
        };

        let details = breakdown.describe(&ScoringWeights::default());
        assert_eq!(
            details,
            "Interest compatibility: 40.0/40 (Common interests: reading, hiking); \
             Age compatibility: 10.0/20 (Age difference: Unknown); \
             Location compatibility: 12.3/20 (Distance: 3.2 km); \
             Preference compatibility: 0.0/20 (Matching preferences: 0/0)"
        );
        assert!((breakdown.total() - 62.345).abs() < 1e-9);
    }

    #[test]
    fn test_describe_no_common_interests() {
        let breakdown = ScoreBreakdown {
            interests: InterestScore {
                points: 0.0,
                common: vec![],
            },
            age: AgeScore {
                points: 16.0,
                difference: Some(1),
            },
            location: LocationScore::by_similarity(20.0, None),
            preferences: PreferenceScore {
                points: 20.0,
                matching: 2,
                total: 2,
            },
        };

        let details = breakdown.describe(&ScoringWeights::default());
        assert!(details.contains("(Common interests: None)"));
        assert!(details.contains("(Age difference: 1 years)"));
        assert!(details.contains("(Distance: Unknown)"));
        assert!(details.contains("(Matching preferences: 2/2)"));
    }
}
