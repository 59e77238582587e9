use crate::model::{DriverMetrics, RatingManipulationResult, RecommendedAction};
use crate::stats::mean;
#[cfg(not(test))]
use tracing::info;
#[cfg(test)]
use std::println as info;

const MIN_RATING_SAMPLE: usize = 10;

/// Ratings expected per completed delivery; most customers skip the rating
/// prompt, so a driver collecting far more than this is inflating.
const EXPECTED_RATING_RATE: f64 = 0.3;

const MANIPULATION_THRESHOLD: u32 = 50;

/// Score a rating series against independent manipulation heuristics.
///
/// Each heuristic contributes a fixed amount to a 0-100 suspicion score;
/// the heuristics are deliberately independent so a single gamed pattern
/// cannot hide behind an otherwise-clean history. Fewer than 10 ratings
/// yields a neutral result.
pub fn detect_rating_manipulation(
    ratings: &[f64],
    metrics: &DriverMetrics,
) -> RatingManipulationResult {
    let count = ratings.len();
    if count < MIN_RATING_SAMPLE {
        return RatingManipulationResult {
            is_manipulated: false,
            confidence: 0,
            indicators: Vec::new(),
            recommended_action: RecommendedAction::None,
        };
    }

    let mut suspicion: u32 = 0;
    let mut indicators = Vec::new();

    // Heuristic 1: overwhelmingly five-star history
    let five_star = ratings.iter().filter(|r| **r >= 5.0).count();
    let five_star_ratio = five_star as f64 / count as f64;
    if count > 20 && five_star_ratio > 0.95 {
        suspicion += 30;
        indicators.push(format!(
            "{:.0}% five-star ratings across {} samples",
            five_star_ratio * 100.0,
            count
        ));
    } else if five_star_ratio > 0.85 {
        suspicion += 15;
        indicators.push(format!(
            "{:.0}% five-star ratings across {} samples",
            five_star_ratio * 100.0,
            count
        ));
    }

    // Heuristic 2: sudden jump in the recent window
    if count > 20 {
        let recent = mean(&ratings[count - 20..]);
        let earlier = mean(&ratings[..count - 20]);
        if recent - earlier > 1.5 {
            suspicion += 25;
            indicators.push(format!(
                "recent average {:.2} jumped from earlier average {:.2}",
                recent, earlier
            ));
        }
    }

    // Heuristic 3: a long history that is suspiciously free of low ratings
    if count > 50 {
        let low_ratings = ratings.iter().filter(|r| **r <= 1.0).count();
        if low_ratings <= 2 {
            suspicion += 20;
            indicators.push(format!(
                "only {} low ratings across {} samples",
                low_ratings, count
            ));
        }
    }

    // Heuristic 4: more ratings than the delivery volume supports
    let expected = metrics.completed_deliveries as f64 * EXPECTED_RATING_RATE;
    if count as f64 > expected * 2.0 {
        suspicion += 25;
        indicators.push(format!(
            "{} ratings against an expected ~{:.0} for {} completed deliveries",
            count, expected, metrics.completed_deliveries
        ));
    }

    // Heuristic 5: bimodal distribution - extremes drown out the mid-range
    if count > 20 {
        let extremes = ratings.iter().filter(|r| **r <= 1.0 || **r >= 5.0).count();
        let mid_range = ratings
            .iter()
            .filter(|r| **r >= 2.0 && **r <= 4.0)
            .count();
        if extremes > mid_range * 3 {
            suspicion += 15;
            indicators.push(format!(
                "bimodal distribution: {} extreme ratings vs {} mid-range",
                extremes, mid_range
            ));
        }
    }

    let confidence = suspicion.min(100);
    let is_manipulated = confidence >= MANIPULATION_THRESHOLD;

    let recommended_action = if confidence >= 75 {
        RecommendedAction::Suspend
    } else if confidence >= 50 {
        RecommendedAction::Investigate
    } else if confidence >= 25 {
        RecommendedAction::Flag
    } else {
        RecommendedAction::None
    };

    if is_manipulated {
        info!(
            "Rating manipulation detected for driver {} (confidence {}): {}",
            metrics.driver_id,
            confidence,
            indicators.join("; ")
        );
    }

    RatingManipulationResult {
        is_manipulated,
        confidence,
        indicators,
        recommended_action,
    }
}
