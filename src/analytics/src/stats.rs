use fleet_core::Mean;
use std::cmp::Ordering;

/// Mean and population standard deviation of a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl Spread {
    /// Returns `None` for an empty slice. Values are sorted first so that the
    /// result does not depend on input order.
    pub fn new(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let mean = sorted.iter().copied().mean()?;
        let variance = sorted
            .iter()
            .map(|v| (v - mean).powi(2))
            .mean()
            .unwrap_or_default();

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            count: sorted.len(),
        })
    }
}

/// Median of a slice sorted with [`f64::total_cmp`].
pub fn sorted_median(sorted: &[f64]) -> Option<f64> {
    let len = sorted.len();
    match len {
        0 => None,
        _ if len % 2 == 1 => Some(sorted[len / 2]),
        _ => Some((sorted[len / 2 - 1] + sorted[len / 2]) / 2.0),
    }
}

pub fn max_f64(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}
