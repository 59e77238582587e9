/// Shared Test Helpers for Cross-Crate Use
///
/// This module provides centralized test utilities that can be used across
/// the workspace crates to avoid code duplication: unique driver ids for
/// parallel tests, timestamp builders and rating-series factories.

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Global counter for truly unique test identifiers across parallel tests
static GLOBAL_TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate globally unique driver ids that won't conflict across parallel tests
///
/// This creates ids using timestamp + atomic counter to ensure uniqueness even
/// when running tests in parallel across multiple threads and crates.
///
/// # Arguments
/// * `prefix` - A string prefix to identify the test type (e.g., "DRV", "ZONE")
///
/// # Returns
/// A unique string in the format: "{prefix}-{timestamp}-{counter}"
pub fn generate_unique_driver_id(prefix: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();
    let counter = GLOBAL_TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}-{}", prefix, timestamp, counter)
}

/// A timestamp `days` whole days before `now`. Used to exercise the
/// inactivity deactivation rule and account-age paths.
pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// A rating series of `count` identical ratings.
pub fn uniform_ratings(count: usize, rating: f64) -> Vec<f64> {
    vec![rating; count]
}

/// A plausible organic rating series: mostly 4s and 5s with the occasional
/// low rating, cycling deterministically so assertions stay stable.
pub fn mixed_ratings(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| match i % 10 {
            0 => 3.0,
            5 => 1.0,
            7 => 4.0,
            _ => 5.0,
        })
        .collect()
}

// =============================================================================
// UNIFIED TEST ERROR HANDLING
// =============================================================================

/// Unified error type for all test failures
///
/// This provides a consistent error interface across all test suites,
/// making debugging easier and error handling more predictable.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error("Mock failure: {message}")]
    MockFailure { message: String },

    #[error("Assertion failed: {message}")]
    AssertionFailure { message: String },

    #[error("Generic test error: {message}")]
    Generic { message: String },
}

impl TestError {
    /// Create a mock failure error
    pub fn mock_failure(message: impl Into<String>) -> Self {
        Self::MockFailure {
            message: message.into(),
        }
    }

    /// Create an assertion failure error
    pub fn assertion_failure(message: impl Into<String>) -> Self {
        Self::AssertionFailure {
            message: message.into(),
        }
    }
}
