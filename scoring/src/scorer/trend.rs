use crate::model::{PerformanceTrend, ScoreHistoryPoint, TrendDirection};
use crate::stats::linear_regression;

/// Regression window: the most recent weekly samples that drive the fit.
const TREND_WINDOW: usize = 8;

/// ~30 days expressed in weekly samples.
const SAMPLES_IN_30_DAYS: f64 = 4.3;

const DIRECTION_THRESHOLD: f64 = 1.0;

/// Fit the recent score history and project 30 days out.
///
/// Only the last [`TREND_WINDOW`] points participate, so a long-recovered
/// slump does not drag the projection down. With fewer than 2 points there
/// is nothing to fit: the single known score is returned unprojected.
pub fn analyze_performance_trend(history: &[ScoreHistoryPoint]) -> PerformanceTrend {
    if history.len() < 2 {
        let last_score = history.last().map(|point| point.score).unwrap_or(0.0);
        return PerformanceTrend {
            direction: TrendDirection::Stable,
            change_per_week: 0.0,
            projected_score_30_days: last_score,
        };
    }

    let window = &history[history.len().saturating_sub(TREND_WINDOW)..];
    let scores: Vec<f64> = window.iter().map(|point| point.score).collect();
    let (slope, _, _) = linear_regression(&scores);

    let last_score = scores.last().copied().unwrap_or(0.0);
    let projected = (last_score + slope * SAMPLES_IN_30_DAYS).clamp(0.0, 100.0);

    let direction = if slope > DIRECTION_THRESHOLD {
        TrendDirection::Improving
    } else if slope < -DIRECTION_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    PerformanceTrend {
        direction,
        change_per_week: slope,
        projected_score_30_days: projected,
    }
}
