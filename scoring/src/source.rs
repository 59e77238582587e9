use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::model::{DriverId, DriverMetrics, GenericError, ScoreHistoryPoint, ZoneAverages};

/// The metrics-aggregation collaborator: everything the engine consumes
/// for one evaluation window, as caller-provided snapshots.
#[async_trait]
pub trait MetricsSource: Send + Sync {
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

/// One exported snapshot document, as produced by the platform's batch
/// export. Histories are keyed by driver id; zones by zone id.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SnapshotDocument {
    pub drivers: Vec<DriverMetrics>,
    #[serde(default)]
    pub zones: HashMap<String, ZoneAverages>,
    #[serde(default)]
    pub rating_history: HashMap<DriverId, Vec<f64>>,
    #[serde(default)]
    pub metric_history: HashMap<DriverId, HashMap<String, Vec<f64>>>,
    #[serde(default)]
    pub score_history: HashMap<DriverId, Vec<ScoreHistoryPoint>>,
}

/// File-backed source reading one JSON snapshot document.
pub struct JsonFileSource {
    document: SnapshotDocument,
}

impl JsonFileSource {
    pub async fn load(path: &Path) -> Result<Self, GenericError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let document: SnapshotDocument = serde_json::from_str(&contents)?;
        Ok(Self { document })
    }

    pub fn from_document(document: SnapshotDocument) -> Self {
        Self { document }
    }
}

#[async_trait]
impl MetricsSource for JsonFileSource {
    async fn driver_snapshots(&self) -> Result<Vec<DriverMetrics>, GenericError> {
        Ok(self.document.drivers.clone())
    }

    async fn zone_averages(&self, zone_id: &str) -> Result<Option<ZoneAverages>, GenericError> {
        Ok(self.document.zones.get(zone_id).cloned())
    }

    async fn rating_history(&self, driver_id: &DriverId) -> Result<Vec<f64>, GenericError> {
        Ok(self
            .document
            .rating_history
            .get(driver_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn metric_history(
        &self,
        driver_id: &DriverId,
    ) -> Result<HashMap<String, Vec<f64>>, GenericError> {
        Ok(self
            .document
            .metric_history
            .get(driver_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn score_history(
        &self,
        driver_id: &DriverId,
    ) -> Result<Vec<ScoreHistoryPoint>, GenericError> {
        Ok(self
            .document
            .score_history
            .get(driver_id)
            .cloned()
            .unwrap_or_default())
    }
}
