use crate::config::AnalysisConfig;
use crate::slots::{aisle_prefix, SlotIndex};
use crate::types::Point;
use tracing::warn;

/// Straight-line travel inside one aisle, converted to reporting units.
pub fn same_aisle_distance(p1: Point, p2: Point, divisor: f64) -> f64 {
    ((p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)).sqrt() / divisor
}

/// Travel between aisles: up or down to a cross aisle, across, then to the target.
/// The cheapest cross aisle is chosen.
pub fn cross_aisle_distance(p1: Point, p2: Point, crossover_ys: &[f64], divisor: f64) -> f64 {
    let dx = (p1.x - p2.x).abs();
    let best = crossover_ys
        .iter()
        .map(|&cy| (p1.y - cy).abs() + dx + (cy - p2.y).abs())
        .fold(f64::INFINITY, f64::min);

    best / divisor
}

/// Slot-to-slot travel distance over a built [`SlotIndex`].
pub struct DistanceModel<'a> {
    index: &'a SlotIndex,
    config: &'a AnalysisConfig,
}

impl<'a> DistanceModel<'a> {
    pub fn new(index: &'a SlotIndex, config: &'a AnalysisConfig) -> Self {
        Self { index, config }
    }

    /// Distance walked from `from` to `to`.
    ///
    /// Slots missing from the layout contribute nothing: a warning is logged and
    /// `0.0` is returned so that one bad row never aborts a run.
    pub fn distance(&self, from: &str, to: &str) -> f64 {
        if from == to {
            return 0.0;
        }

        let (p1, p2) = match (self.index.coords(from), self.index.coords(to)) {
            (Some(p1), Some(p2)) => (p1, p2),
            _ => {
                warn!("Missing coordinates for {} or {}", from, to);
                return 0.0;
            }
        };

        if aisle_prefix(from) == aisle_prefix(to) {
            same_aisle_distance(p1, p2, self.config.unit_divisor)
        } else {
            cross_aisle_distance(
                p1,
                p2,
                &self.config.crossover_ys,
                self.config.unit_divisor,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LayoutRow;
    use std::io;
    use std::sync::{Arc, Mutex};

    const EPS: f64 = 1e-9;

    fn index(slots: &[(&str, f64, f64)]) -> SlotIndex {
        let rows: Vec<LayoutRow> = slots
            .iter()
            .enumerate()
            .map(|(i, (slot, x, y))| LayoutRow {
                item: format!("item{}", i),
                slot_id: slot.to_string(),
                pick_seq: i as i64,
                x: *x,
                y: *y,
            })
            .collect();
        SlotIndex::build(&rows)
    }

    #[test]
    fn test_same_slot_is_zero() {
        let idx = index(&[("A1", 5.0, 7.0)]);
        let config = AnalysisConfig::default();
        let model = DistanceModel::new(&idx, &config);
        assert_eq!(model.distance("A1", "A1"), 0.0);
        // even a slot the layout has never heard of
        assert_eq!(model.distance("ZZ9", "ZZ9"), 0.0);
    }

    #[test]
    fn test_same_aisle_is_euclidean() {
        let idx = index(&[("A1", 0.0, 0.0), ("A2", 12.0, 0.0), ("A3", 36.0, 48.0)]);
        let config = AnalysisConfig::default();
        let model = DistanceModel::new(&idx, &config);

        assert!((model.distance("A1", "A2") - 1.0).abs() < EPS);
        assert!((model.distance("A1", "A3") - 5.0).abs() < EPS);
    }

    #[test]
    fn test_same_aisle_ignores_crossovers() {
        let idx = index(&[("A1", 0.0, 0.0), ("A2", 0.0, 5000.0)]);
        let config = AnalysisConfig {
            crossover_ys: vec![1.0],
            ..AnalysisConfig::default()
        };
        let model = DistanceModel::new(&idx, &config);
        assert!((model.distance("A1", "A2") - 5000.0 / 12.0).abs() < EPS);
    }

    #[test]
    fn test_cross_aisle_worked_example() {
        // via row 109: 109 + 0 + 91 = 200
        let idx = index(&[("A1", 0.0, 0.0), ("B1", 0.0, 200.0)]);
        let config = AnalysisConfig::default();
        let model = DistanceModel::new(&idx, &config);
        assert!((model.distance("A1", "B1") - 200.0 / 12.0).abs() < EPS);
    }

    #[test]
    fn test_each_crossover_can_be_optimal() {
        let config = AnalysisConfig::default();

        for &cy in &config.crossover_ys {
            let idx = index(&[("A1", 0.0, cy + 10.0), ("B1", 36.0, cy - 10.0)]);
            let model = DistanceModel::new(&idx, &config);

            let expected = config
                .crossover_ys
                .iter()
                .map(|&c| ((cy + 10.0) - c).abs() + 36.0 + (c - (cy - 10.0)).abs())
                .fold(f64::INFINITY, f64::min)
                / 12.0;

            assert!((expected - 56.0 / 12.0).abs() < EPS, "row {} not optimal", cy);
            assert!((model.distance("A1", "B1") - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_cross_aisle_picks_nearest_row_between_rows() {
        // 2 * 891 via 109 beats 2 * 895 via 1895
        let p1 = Point::new(0.0, 1000.0);
        let p2 = Point::new(0.0, 1000.0);
        let d = cross_aisle_distance(p1, p2, &[109.0, 1895.0, 3025.0, 3885.0], 1.0);
        assert!((d - 1782.0).abs() < EPS);
    }

    #[test]
    fn test_cross_aisle_is_symmetric() {
        let idx = index(&[("A10", 120.0, 400.0), ("C22", 980.0, 2950.0)]);
        let config = AnalysisConfig::default();
        let model = DistanceModel::new(&idx, &config);

        let forward = model.distance("A10", "C22");
        let backward = model.distance("C22", "A10");
        assert!(forward > 0.0);
        assert!((forward - backward).abs() < EPS);
    }

    #[test]
    fn test_missing_coordinates_fall_back_to_zero() {
        let idx = index(&[("A1", 0.0, 0.0)]);
        let config = AnalysisConfig::default();
        let model = DistanceModel::new(&idx, &config);

        assert_eq!(model.distance("A1", "Q99"), 0.0);
        assert_eq!(model.distance("Q99", "A1"), 0.0);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_missing_coordinates_log_a_warning() {
        let idx = index(&[("A1", 0.0, 0.0), ("A2", 12.0, 0.0)]);
        let config = AnalysisConfig::default();
        let model = DistanceModel::new(&idx, &config);

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let resolved = tracing::subscriber::with_default(subscriber, || {
            model.distance("A1", "A2")
        });
        assert!((resolved - 1.0).abs() < EPS);
        assert!(logs.text().is_empty());

        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let writer = logs.clone();
                move || writer.clone()
            })
            .with_ansi(false)
            .finish();
        let missing = tracing::subscriber::with_default(subscriber, || {
            model.distance("A1", "Q99")
        });

        assert_eq!(missing, 0.0);
        let text = logs.text();
        assert!(text.contains("WARN"));
        assert!(text.contains("Missing coordinates for A1 or Q99"));
    }

    #[test]
    fn test_unit_divisor_is_configurable() {
        let idx = index(&[("A1", 0.0, 0.0), ("A2", 3.0, 4.0)]);
        let config = AnalysisConfig {
            unit_divisor: 1.0,
            ..AnalysisConfig::default()
        };
        let model = DistanceModel::new(&idx, &config);
        assert!((model.distance("A1", "A2") - 5.0).abs() < EPS);
    }
}
