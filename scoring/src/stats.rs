/// Small statistical helpers shared by the trend analyzers and the z-score
/// anomaly path. Population (not sample) statistics throughout, matching
/// the windowed baselines the detectors use.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary least-squares fit of `values` against x = 0..n.
///
/// Returns `(slope, intercept, r_squared)`. Fewer than 2 points cannot
/// define a line: slope 0, intercept = first value (or 0), r_squared 0.
/// A constant series also reports r_squared 0 (no variance to explain).
pub fn linear_regression(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len();
    if n < 2 {
        return (0.0, values.first().copied().unwrap_or(0.0), 0.0);
    }

    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = mean(values);

    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        ss_xy += dx * (y - y_mean);
        ss_xx += dx * dx;
    }

    let slope = ss_xy / ss_xx;
    let intercept = y_mean - slope * x_mean;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, y) in values.iter().enumerate() {
        let predicted = intercept + slope * i as f64;
        ss_res += (y - predicted).powi(2);
        ss_tot += (y - y_mean).powi(2);
    }

    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    (slope, intercept, r_squared)
}
