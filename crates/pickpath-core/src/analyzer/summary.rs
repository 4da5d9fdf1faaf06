use super::*;

/// Mean, median and 90th percentile of total trip distance.
/// An empty category yields all zeros.
pub fn category_stats(trips: &[TripResult]) -> CategoryStats {
    if trips.is_empty() {
        return CategoryStats::default();
    }

    let mut totals: Vec<f64> = trips.iter().map(|t| t.total_distance).collect();
    totals.sort_by(f64::total_cmp);

    CategoryStats {
        trips: totals.len(),
        mean: totals.iter().sum::<f64>() / totals.len() as f64,
        median: percentile(&totals, 0.5),
        p90: percentile(&totals, 0.9),
    }
}

/// Quantile `q` of ascending `sorted` values, interpolating linearly between
/// the two closest ranks.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (n - 1) as f64 * q.clamp(0.0, 1.0);
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}
