use chrono::{DateTime, Utc, serde::ts_seconds};
use serde::{Deserialize, Serialize};
use std::error::Error;
use strum_macros::{Display as EnumDisplay, EnumString};

pub type DriverId = String;

pub type GenericError = Box<dyn Error + Send + Sync>;

/// Per-driver aggregate counters for one evaluation window.
///
/// Produced fresh by the metrics collaborator for every run; the engine
/// never mutates it. Counter invariants (completed <= total, on-time <=
/// completed, accepted <= offered, cancelled <= total) are the caller's
/// responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverMetrics {
    pub driver_id: DriverId,
    pub total_deliveries: u32,
    pub completed_deliveries: u32,
    /// 1-5 scale, or 0 when the driver has never been rated.
    pub average_rating: f64,
    pub total_ratings: u32,
    pub on_time_deliveries: u32,
    pub accepted_orders: u32,
    pub offered_orders: u32,
    pub cancelled_orders: u32,
    pub fraud_flags: u32,
    #[serde(with = "ts_seconds")]
    pub last_active_at: DateTime<Utc>,
    #[serde(with = "ts_seconds")]
    pub account_created_at: DateTime<Utc>,
    /// Dispatch zone, when known. Enables peer comparison in the runner.
    #[serde(default)]
    pub zone_id: Option<String>,
}

impl DriverMetrics {
    pub fn completion_rate(&self) -> f64 {
        if self.total_deliveries == 0 {
            return 0.0;
        }
        self.completed_deliveries as f64 / self.total_deliveries as f64 * 100.0
    }

    pub fn on_time_rate(&self) -> f64 {
        if self.completed_deliveries == 0 {
            return 0.0;
        }
        self.on_time_deliveries as f64 / self.completed_deliveries as f64 * 100.0
    }

    /// None when the driver has never been offered an order. Call sites
    /// choose the default: 0 for scoring, 100 for deactivation checks.
    pub fn acceptance_rate(&self) -> Option<f64> {
        if self.offered_orders == 0 {
            return None;
        }
        Some(self.accepted_orders as f64 / self.offered_orders as f64 * 100.0)
    }

    pub fn cancellation_rate(&self) -> f64 {
        if self.total_deliveries == 0 {
            return 0.0;
        }
        self.cancelled_orders as f64 / self.total_deliveries as f64 * 100.0
    }
}

/// Performance brackets in ascending order. Variant order is the tier
/// ranking, so `Ord` gives "at least silver" style comparisons directly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumDisplay,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DriverTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// Static configuration for one tier: contiguous score range plus the
/// dispatch and payout knobs derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct TierConfig {
    pub tier: DriverTier,
    pub min_score: f64,
    pub max_score: f64,
    pub label: String,
    pub priority_bonus: u32,
    pub rate_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDimension {
    pub name: String,
    pub raw_value: f64,
    pub normalized_value: f64,
    pub weight: f64,
    pub weighted_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: f64,
    pub dimensions: Vec<ScoreDimension>,
    pub tier: DriverTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivationResult {
    pub should_deactivate: bool,
    pub reasons: Vec<String>,
    pub grace_period_days: u32,
    pub can_appeal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecommendedAction {
    None,
    Flag,
    Investigate,
    Suspend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingManipulationResult {
    pub is_manipulated: bool,
    /// 0-100 suspicion score accumulated from the independent heuristics.
    pub confidence: u32,
    pub indicators: Vec<String>,
    pub recommended_action: RecommendedAction,
}

/// Severity ladder; variant order doubles as the risk ordering.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumDisplay,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub metric_name: String,
    pub value: f64,
    pub z_score: f64,
    pub severity: AnomalySeverity,
    pub message: String,
    #[serde(with = "ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

/// Zone-level reference aggregate supplied by the metrics collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneAverages {
    pub zone_id: String,
    pub average_rating: f64,
    pub average_completion_rate: f64,
    pub average_on_time_rate: f64,
    pub average_acceptance_rate: f64,
    pub average_cancellation_rate: f64,
    pub driver_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerComparison {
    pub driver_id: DriverId,
    pub rating_percentile: f64,
    pub completion_percentile: f64,
    pub on_time_percentile: f64,
    pub acceptance_percentile: f64,
    pub cancellation_percentile: f64,
    pub overall_percentile: f64,
    pub is_outlier: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedAnomalies {
    pub driver_id: DriverId,
    pub anomalies: Vec<Anomaly>,
    pub risk_level: AnomalySeverity,
    pub should_auto_suspend: bool,
    pub suspend_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreHistoryPoint {
    #[serde(with = "ts_seconds")]
    pub date: DateTime<Utc>,
    pub score: f64,
    pub tier: DriverTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

/// Weekly-sample regression summary of a driver's score history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceTrend {
    pub direction: TrendDirection,
    pub change_per_week: f64,
    pub projected_score_30_days: f64,
}

/// Full least-squares summary of an arbitrary metric series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub direction: TrendDirection,
    pub confidence: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MovingAverageTrend {
    Rising,
    Falling,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingAverageResult {
    /// The smoothed series; one point per input position once the window
    /// has filled.
    pub values: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    pub latest: f64,
    pub trend: MovingAverageTrend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDriver {
    pub driver_id: DriverId,
    pub score: f64,
    pub tier: DriverTier,
}

/// Everything the runner computes for one driver in one evaluation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverReport {
    pub driver_id: DriverId,
    pub breakdown: ScoreBreakdown,
    pub summary: String,
    pub deactivation: DeactivationResult,
    pub anomalies: AggregatedAnomalies,
    pub peer_comparison: Option<PeerComparison>,
    pub rating_manipulation: RatingManipulationResult,
    pub trend: PerformanceTrend,
}
