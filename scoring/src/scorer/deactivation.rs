use chrono::{DateTime, Utc};

use crate::model::{DeactivationResult, DriverMetrics};
use crate::scorer::MIN_SCORING_DELIVERIES;

const MIN_COMPLETION_RATE: f64 = 40.0;
const MAX_CANCELLATION_RATE: f64 = 50.0;
const MIN_ACCEPTANCE_RATE: f64 = 20.0;
const MIN_AVERAGE_RATING: f64 = 2.0;
const FRAUD_FLAG_LIMIT: u32 = 5;
const MAX_INACTIVE_DAYS: i64 = 90;

const GRACE_PERIOD_DAYS: u32 = 7;

/// Evaluate every deactivation rule against one metrics snapshot.
///
/// Rate rules only apply once the driver has a scoring-grade sample
/// (`total_deliveries >= 5`); rating, fraud and inactivity rules are
/// volume-independent. All triggered reasons are reported together.
/// Fraud removes the appeal path and the grace period.
pub fn check_deactivation(metrics: &DriverMetrics, now: DateTime<Utc>) -> DeactivationResult {
    let mut reasons = Vec::new();

    if metrics.total_deliveries >= MIN_SCORING_DELIVERIES {
        let completion = metrics.completion_rate();
        if completion < MIN_COMPLETION_RATE {
            reasons.push(format!(
                "completion rate {:.1}% is below the {:.0}% minimum",
                completion, MIN_COMPLETION_RATE
            ));
        }

        let cancellation = metrics.cancellation_rate();
        if cancellation > MAX_CANCELLATION_RATE {
            reasons.push(format!(
                "cancellation rate {:.1}% exceeds the {:.0}% limit",
                cancellation, MAX_CANCELLATION_RATE
            ));
        }

        // A driver with no offers yet cannot fail the acceptance rule
        let acceptance = metrics.acceptance_rate().unwrap_or(100.0);
        if acceptance < MIN_ACCEPTANCE_RATE {
            reasons.push(format!(
                "acceptance rate {:.1}% is below the {:.0}% minimum",
                acceptance, MIN_ACCEPTANCE_RATE
            ));
        }
    }

    // Unrated drivers (average_rating == 0) are not penalized
    if metrics.average_rating > 0.0 && metrics.average_rating < MIN_AVERAGE_RATING {
        reasons.push(format!(
            "average rating {:.2} is below the {:.1} minimum",
            metrics.average_rating, MIN_AVERAGE_RATING
        ));
    }

    let fraud_triggered = metrics.fraud_flags >= FRAUD_FLAG_LIMIT;
    if fraud_triggered {
        reasons.push(format!(
            "{} fraud flags on record (limit {})",
            metrics.fraud_flags, FRAUD_FLAG_LIMIT
        ));
    }

    let inactive_days = (now - metrics.last_active_at).num_days();
    if inactive_days > MAX_INACTIVE_DAYS {
        reasons.push(format!(
            "inactive for {} days (limit {})",
            inactive_days, MAX_INACTIVE_DAYS
        ));
    }

    let should_deactivate = !reasons.is_empty();
    let (grace_period_days, can_appeal) = if fraud_triggered {
        (0, false)
    } else {
        (GRACE_PERIOD_DAYS, true)
    };

    DeactivationResult {
        should_deactivate,
        reasons,
        grace_period_days,
        can_appeal,
    }
}
