use chrono::Utc;
use common::config::RunnerConfig;
use futures::stream::{self, StreamExt};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;

use crate::{
    anomaly::{compare_to_peers, run_anomaly_pipeline},
    model::{DriverMetrics, DriverReport, GenericError},
    scorer::{
        analyze_performance_trend, check_deactivation, detect_rating_manipulation,
        driver_score_summary, score_breakdown,
    },
    source::MetricsSource,
};
#[cfg(not(test))]
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {
    std::println as debug, std::println as info, std::println as trace, std::println as warn,
};

/// Drives one full evaluation pass: pulls the snapshot from the metrics
/// collaborator, fans the engine out over the fleet, and hands the reports
/// back to the caller. Enforcement of the decisions is not its job.
pub struct Runner {
    config: RunnerConfig,
    source: Arc<dyn MetricsSource>,
}

impl Runner {
    pub fn new(config: RunnerConfig, source: Arc<dyn MetricsSource>) -> Self {
        info!("Initializing new Runner");
        Self { config, source }
    }

    pub async fn run(&self) -> Result<Vec<DriverReport>, GenericError> {
        trace!("Starting evaluation run");
        let started = Instant::now();

        let drivers = self.source.driver_snapshots().await?;
        info!("Evaluating {} drivers", drivers.len());

        // Every evaluation only reads its own snapshot, so drivers fan out
        // concurrently up to the configured width
        let concurrency = self.config.threads.max(1) as usize;
        let results: Vec<Result<DriverReport, GenericError>> = stream::iter(drivers)
            .map(|metrics| self.evaluate_driver(metrics))
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut reports = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!("Failed to evaluate driver: {}", e);
                    return Err(e);
                }
            }
        }

        // buffer_unordered scrambles completion order; rank best-first
        reports.sort_by(|a, b| b.breakdown.overall.total_cmp(&a.breakdown.overall));

        histogram!("atlas_runner_run_seconds", "op" => "run")
            .record(started.elapsed().as_secs_f64());
        info!(
            "Evaluated {} drivers in {} ms",
            reports.len(),
            started.elapsed().as_millis()
        );

        Ok(reports)
    }

    async fn evaluate_driver(&self, metrics: DriverMetrics) -> Result<DriverReport, GenericError> {
        let driver_id = metrics.driver_id.clone();
        debug!("Evaluating driver {}", driver_id);

        let breakdown = score_breakdown(&metrics);
        let summary = driver_score_summary(&metrics);

        let deactivation = check_deactivation(&metrics, Utc::now());
        if deactivation.should_deactivate {
            info!(
                "Driver {} flagged for deactivation: {}",
                driver_id,
                deactivation.reasons.join("; ")
            );
        }

        let ratings = self.source.rating_history(&driver_id).await?;
        let rating_manipulation = detect_rating_manipulation(&ratings, &metrics);

        let metric_history = self.source.metric_history(&driver_id).await?;
        let anomalies = run_anomaly_pipeline(&driver_id, &metric_history, metrics.total_deliveries);

        let peer_comparison = match &metrics.zone_id {
            Some(zone_id) => self
                .source
                .zone_averages(zone_id)
                .await?
                .map(|zone| compare_to_peers(&metrics, &zone)),
            None => None,
        };

        let score_history = self.source.score_history(&driver_id).await?;
        let trend = analyze_performance_trend(&score_history);

        counter!("atlas_drivers_scored_total").increment(1);
        debug!(
            "Driver {} scored {} ({})",
            driver_id, breakdown.overall, breakdown.tier
        );

        Ok(DriverReport {
            driver_id,
            breakdown,
            summary,
            deactivation,
            anomalies,
            peer_comparison,
            rating_manipulation,
            trend,
        })
    }
}
