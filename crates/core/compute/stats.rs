//! Descriptive statistics over numeric columns.

use atxtraffic_types::stats::ColumnSummary;

/// Summarize a column's non-null numeric values.
///
/// Standard deviation uses the sample (N-1) denominator; percentiles use
/// linear interpolation between closest ranks. `values` is sorted in place.
pub fn summarize(values: &mut [f64]) -> ColumnSummary {
    let count = values.len();
    if count == 0 {
        return ColumnSummary::default();
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (count - 1) as f64).sqrt()
    });

    ColumnSummary {
        count,
        mean: Some(mean),
        std,
        min: values.first().copied(),
        p25: Some(percentile(values, 0.25)),
        p50: Some(percentile(values, 0.50)),
        p75: Some(percentile(values, 0.75)),
        max: values.last().copied(),
    }
}

/// Linear-interpolation percentile of an ascending, non-empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
