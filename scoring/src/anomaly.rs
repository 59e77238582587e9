use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::model::{
    AggregatedAnomalies, Anomaly, AnomalySeverity, DriverId, DriverMetrics, MovingAverageResult,
    MovingAverageTrend, PeerComparison, TrendAnalysis, TrendDirection, ZoneAverages,
};
use crate::stats::{linear_regression, mean, population_std_dev};
#[cfg(not(test))]
use tracing::info;
#[cfg(test)]
use std::println as info;

/// Below this many samples a window has no usable baseline.
const MIN_ANOMALY_SAMPLES: usize = 3;

/// |z| at which a value becomes an anomaly at all.
const ANOMALY_Z_THRESHOLD: f64 = 1.5;

/// Auto-suspend never fires below this delivery volume.
const AUTO_SUSPEND_MIN_DELIVERIES: u32 = 10;

const AUTO_SUSPEND_CRITICAL_COUNT: usize = 2;
const AUTO_SUSPEND_HIGH_COUNT: usize = 5;
const AUTO_SUSPEND_TOTAL_COUNT: usize = 10;

pub fn calculate_z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return 0.0;
    }
    (value - mean) / std_dev
}

pub fn severity_from_z_score(z_score: f64) -> AnomalySeverity {
    let magnitude = z_score.abs();
    if magnitude >= 3.0 {
        AnomalySeverity::Critical
    } else if magnitude >= 2.5 {
        AnomalySeverity::High
    } else if magnitude >= 2.0 {
        AnomalySeverity::Medium
    } else {
        AnomalySeverity::Low
    }
}

/// Flag values that deviate from their own window.
///
/// The baseline (population mean and standard deviation) is computed over
/// the same series being evaluated, so a value is "anomalous relative to
/// its own window" rather than to a held-out historical distribution.
/// Fewer than 3 samples yields no flags.
pub fn detect_anomalies(
    values: &[f64],
    metric_name: &str,
    reference_time: Option<DateTime<Utc>>,
) -> Vec<Anomaly> {
    if values.len() < MIN_ANOMALY_SAMPLES {
        return Vec::new();
    }

    let window_mean = mean(values);
    let std_dev = population_std_dev(values);
    let timestamp = reference_time.unwrap_or_else(Utc::now);

    values
        .iter()
        .filter_map(|&value| {
            let z_score = calculate_z_score(value, window_mean, std_dev);
            if z_score.abs() < ANOMALY_Z_THRESHOLD {
                return None;
            }
            Some(Anomaly {
                metric_name: metric_name.to_string(),
                value,
                z_score,
                severity: severity_from_z_score(z_score),
                message: format!(
                    "{} value {:.2} is {:.2} standard deviations from the window mean {:.2}",
                    metric_name, value, z_score, window_mean
                ),
                timestamp,
            })
        })
        .collect()
}

/// Simple moving average with the window clamped to the series length.
///
/// The trend is read off the last 3 smoothed points: rising or falling when
/// the change exceeds 5% of the smoothed mean, stable otherwise.
pub fn calculate_moving_average(values: &[f64], window_size: usize) -> MovingAverageResult {
    if values.is_empty() {
        return MovingAverageResult {
            values: Vec::new(),
            mean: 0.0,
            std_dev: 0.0,
            latest: 0.0,
            trend: MovingAverageTrend::Stable,
        };
    }

    let window = window_size.clamp(1, values.len());
    let smoothed: Vec<f64> = values
        .windows(window)
        .map(|chunk| mean(chunk))
        .collect();

    let smoothed_mean = mean(&smoothed);
    let std_dev = population_std_dev(&smoothed);
    let latest = smoothed.last().copied().unwrap_or(0.0);

    let trend = if smoothed.len() >= 3 {
        let change = smoothed[smoothed.len() - 1] - smoothed[smoothed.len() - 3];
        let threshold = smoothed_mean.abs() * 0.05;
        if change > threshold {
            MovingAverageTrend::Rising
        } else if change < -threshold {
            MovingAverageTrend::Falling
        } else {
            MovingAverageTrend::Stable
        }
    } else {
        MovingAverageTrend::Stable
    };

    MovingAverageResult {
        values: smoothed,
        mean: smoothed_mean,
        std_dev,
        latest,
        trend,
    }
}

// Ratio-to-zone-average heuristic scaled so "at the average" lands on 50.
// Not an order-statistic percentile; the field name is kept for
// compatibility with the consumers of these reports.
fn ratio_percentile(driver_value: f64, zone_average: f64) -> f64 {
    if zone_average == 0.0 {
        return 0.0;
    }
    (driver_value / zone_average * 50.0).clamp(0.0, 100.0)
}

/// Contrast one driver's rates against their zone's averages.
pub fn compare_to_peers(metrics: &DriverMetrics, zone: &ZoneAverages) -> PeerComparison {
    let rating_percentile = ratio_percentile(metrics.average_rating, zone.average_rating);
    let completion_percentile =
        ratio_percentile(metrics.completion_rate(), zone.average_completion_rate);
    let on_time_percentile = ratio_percentile(metrics.on_time_rate(), zone.average_on_time_rate);
    let acceptance_percentile = ratio_percentile(
        metrics.acceptance_rate().unwrap_or(0.0),
        zone.average_acceptance_rate,
    );
    // Lower cancellation is better, so the ratio inverts
    let cancellation_percentile = 100.0
        - ratio_percentile(metrics.cancellation_rate(), zone.average_cancellation_rate);

    let overall_percentile = (rating_percentile
        + completion_percentile
        + on_time_percentile
        + acceptance_percentile
        + cancellation_percentile)
        / 5.0;

    PeerComparison {
        driver_id: metrics.driver_id.clone(),
        rating_percentile,
        completion_percentile,
        on_time_percentile,
        acceptance_percentile,
        cancellation_percentile,
        overall_percentile,
        is_outlier: overall_percentile < 20.0 || overall_percentile > 90.0,
    }
}

/// Full least-squares trend over an arbitrary metric series.
pub fn analyze_trend(values: &[f64]) -> TrendAnalysis {
    let (slope, intercept, r_squared) = linear_regression(values);

    if values.len() < 2 {
        return TrendAnalysis {
            slope,
            intercept,
            r_squared,
            direction: TrendDirection::Stable,
            confidence: 0,
        };
    }

    let direction = if slope > 0.5 {
        TrendDirection::Improving
    } else if slope < -0.5 {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    TrendAnalysis {
        slope,
        intercept,
        r_squared,
        direction,
        confidence: (r_squared * 100.0).round() as u32,
    }
}

/// Roll per-metric anomalies up into one per-driver decision.
///
/// Auto-suspend requires a minimum delivery volume and one of the fixed
/// count thresholds; the risk level is the highest severity present.
pub fn aggregate_anomalies(
    driver_id: &str,
    anomalies: Vec<Anomaly>,
    total_deliveries: u32,
) -> AggregatedAnomalies {
    let critical_count = anomalies
        .iter()
        .filter(|a| a.severity == AnomalySeverity::Critical)
        .count();
    let high_count = anomalies
        .iter()
        .filter(|a| a.severity == AnomalySeverity::High)
        .count();

    let risk_level = anomalies
        .iter()
        .map(|a| a.severity)
        .max()
        .unwrap_or(AnomalySeverity::Low);

    let suspend_reason = if total_deliveries >= AUTO_SUSPEND_MIN_DELIVERIES {
        if critical_count >= AUTO_SUSPEND_CRITICAL_COUNT {
            Some(format!("{} critical anomalies detected", critical_count))
        } else if high_count >= AUTO_SUSPEND_HIGH_COUNT {
            Some(format!("{} high-severity anomalies detected", high_count))
        } else if anomalies.len() >= AUTO_SUSPEND_TOTAL_COUNT {
            Some(format!("{} anomalies detected in total", anomalies.len()))
        } else {
            None
        }
    } else {
        None
    };

    let should_auto_suspend = suspend_reason.is_some();
    if let Some(reason) = &suspend_reason {
        info!("Auto-suspending driver {}: {}", driver_id, reason);
    }

    AggregatedAnomalies {
        driver_id: driver_id.to_string(),
        anomalies,
        risk_level,
        should_auto_suspend,
        suspend_reason,
    }
}

/// Detect anomalies independently per named metric series and aggregate.
///
/// Series are processed in name order so reports are deterministic.
pub fn run_anomaly_pipeline(
    driver_id: &DriverId,
    metric_history: &HashMap<String, Vec<f64>>,
    total_deliveries: u32,
) -> AggregatedAnomalies {
    let mut names: Vec<&String> = metric_history.keys().collect();
    names.sort();

    let mut anomalies = Vec::new();
    for name in names {
        anomalies.extend(detect_anomalies(&metric_history[name], name, None));
    }

    aggregate_anomalies(driver_id, anomalies, total_deliveries)
}
