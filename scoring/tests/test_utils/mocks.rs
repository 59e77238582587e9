use async_trait::async_trait;
use mockall::mock;
use std::collections::HashMap;

use scoring::model::{DriverId, DriverMetrics, GenericError, ScoreHistoryPoint, ZoneAverages};
use scoring::source::MetricsSource;

mock! {
    pub MetricsSource {}

    #[async_trait]
    impl MetricsSource for MetricsSource {
        async fn driver_snapshots(&self) -> Result<Vec<DriverMetrics>, GenericError>;

        async fn zone_averages(&self, zone_id: &str) -> Result<Option<ZoneAverages>, GenericError>;

        async fn rating_history(&self, driver_id: &DriverId) -> Result<Vec<f64>, GenericError>;

        async fn metric_history(
            &self,
            driver_id: &DriverId,
        ) -> Result<HashMap<String, Vec<f64>>, GenericError>;

        async fn score_history(
            &self,
            driver_id: &DriverId,
        ) -> Result<Vec<ScoreHistoryPoint>, GenericError>;
    }
}
