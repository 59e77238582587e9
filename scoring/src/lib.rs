pub mod anomaly;
pub mod batch;
pub mod executable_utils;
pub mod model;
pub mod normalize;
pub mod runner;
pub mod scorer;
pub mod source;
pub mod stats;
