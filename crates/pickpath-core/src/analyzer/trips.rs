use super::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

impl Analyzer {
    /// Joins a raw pick to its home slot.
    pub(super) fn resolve<'a>(&'a self, row: &'a PickRow) -> PickRecord<'a> {
        match self.index.lookup(&row.item) {
            Some(info) => PickRecord {
                row,
                slot_id: Some(info.slot_id),
                pick_seq: Some(info.pick_seq),
                coords: info.coords,
            },
            None => PickRecord {
                row,
                slot_id: None,
                pick_seq: None,
                coords: None,
            },
        }
    }

    /// One result row per trip of `category`, ordered by trip id.
    /// Rows without a trip id belong to no trip and are skipped.
    pub(super) fn analyze_category(&self, category: &str, rows: &[&PickRow]) -> Vec<TripResult> {
        let mut groups: HashMap<&str, Vec<PickRecord<'_>>> = HashMap::new();
        for row in rows.iter().filter(|row| {
            row.trip_category.as_deref() == Some(category) && !row.trip.trim().is_empty()
        }) {
            groups
                .entry(row.trip.as_str())
                .or_default()
                .push(self.resolve(row));
        }

        let mut groups: Vec<(&str, Vec<PickRecord<'_>>)> = groups.into_iter().collect();
        groups.sort_by(|a, b| compare_trip_ids(a.0, b.0));

        let model = self.distance_model();
        let total_trips = groups.len();
        groups
            .into_iter()
            .enumerate()
            .map(|(i, (trip, records))| {
                if (i + 1) % 100 == 0 {
                    debug!("Processing trip {}/{}", i + 1, total_trips);
                }
                summarize_trip(&model, category, trip, records)
            })
            .collect()
    }
}

/// Walks a trip's picks in sequence order and totals the legs between them.
///
/// Legs touching an unmapped item contribute zero. The pick count includes
/// unmapped picks.
pub fn summarize_trip(
    model: &DistanceModel<'_>,
    trip_category: &str,
    trip: &str,
    mut records: Vec<PickRecord<'_>>,
) -> TripResult {
    // stable: equal sequence numbers keep input order, unmapped picks go last
    records.sort_by(|a, b| match (a.pick_seq, b.pick_seq) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let unresolved = records.iter().filter(|r| r.coords.is_none()).count();
    if unresolved > 0 {
        debug!(
            "Trip {} has {} of {} picks without coordinates",
            trip,
            unresolved,
            records.len()
        );
    }

    let legs: Vec<f64> = records
        .windows(2)
        .map(|pair| match (pair[0].slot_id, pair[1].slot_id) {
            (Some(from), Some(to)) => model.distance(from, to),
            _ => 0.0,
        })
        .collect();

    let total_distance: f64 = legs.iter().sum();
    TripResult {
        trip_category: trip_category.to_string(),
        trip: trip.to_string(),
        total_distance,
        average_distance: total_distance / legs.len().max(1) as f64,
        num_picks: records.len(),
    }
}

/// Integer ids first in numeric order, then everything else lexically.
fn compare_trip_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
