use crate::config::AnalysisConfig;
use crate::types::{FilterSummary, PickRow};
use std::collections::HashSet;
use tracing::info;

/// Picks that survived filtering, plus what was dropped along the way
#[derive(Debug, Clone)]
pub struct FilteredPicks<'a> {
    pub rows: Vec<&'a PickRow>,
    pub summary: FilterSummary,
}

/// Keeps only representative storage picks.
///
/// A row is dropped when its trip type is the excluded one or its area is not the
/// required one. Afterwards any trip with a pick at one of the excluded staging
/// codes is dropped as a whole, every one of its rows included.
pub fn filter_picks<'a>(rows: &'a [PickRow], config: &AnalysisConfig) -> FilteredPicks<'a> {
    let kept: Vec<&PickRow> = rows
        .iter()
        .filter(|row| {
            row.trip_type != config.excluded_trip_type
                && row.whse_area == config.required_whse_area
        })
        .collect();
    let dropped_by_type_or_area = rows.len() - kept.len();

    let mut excluded_trips: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in &kept {
        let at_staging = row
            .pick_slot
            .as_deref()
            .is_some_and(|slot| config.excluded_pick_slots.iter().any(|s| s == slot));
        if at_staging && seen.insert(row.trip.as_str()) {
            excluded_trips.push(row.trip.clone());
        }
    }

    let before = kept.len();
    let kept: Vec<&PickRow> = kept
        .into_iter()
        .filter(|row| !seen.contains(row.trip.as_str()))
        .collect();
    let dropped_by_staging = before - kept.len();

    info!(
        "Filtered pick data: {} of {} rows remain after removing {} picks, non-{} picks, and {} trips staged at {}",
        kept.len(),
        rows.len(),
        config.excluded_trip_type,
        config.required_whse_area,
        excluded_trips.len(),
        config.excluded_pick_slots.join("/"),
    );

    FilteredPicks {
        summary: FilterSummary {
            input_rows: rows.len(),
            dropped_by_type_or_area,
            dropped_by_staging,
            excluded_trips,
            retained_rows: kept.len(),
        },
        rows: kept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(trip: &str, area: &str, trip_type: &str, pick_slot: Option<&str>) -> PickRow {
        PickRow {
            trip: trip.to_string(),
            trip_category: Some("Case".to_string()),
            item: "100".to_string(),
            whse_area: area.to_string(),
            trip_type: trip_type.to_string(),
            pick_slot: pick_slot.map(str::to_string),
        }
    }

    #[test]
    fn test_full_pull_always_dropped() {
        let rows = vec![
            pick("T1", "Storage", "Full Pull", None),
            pick("T1", "Storage", "Case Pick", None),
        ];
        let filtered = filter_picks(&rows, &AnalysisConfig::default());
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].trip_type, "Case Pick");
        assert_eq!(filtered.summary.dropped_by_type_or_area, 1);
    }

    #[test]
    fn test_non_storage_area_dropped() {
        let rows = vec![
            pick("T1", "Freezer", "Case Pick", None),
            pick("T2", "storage", "Case Pick", None),
            pick("T3", "Storage", "Case Pick", None),
        ];
        let filtered = filter_picks(&rows, &AnalysisConfig::default());
        let trips: Vec<&str> = filtered.rows.iter().map(|r| r.trip.as_str()).collect();
        assert_eq!(trips, vec!["T3"]);
    }

    #[test]
    fn test_staging_pick_poisons_whole_trip() {
        let rows = vec![
            pick("T1", "Storage", "Case Pick", Some("S-001")),
            pick("T1", "Storage", "Case Pick", Some("PP09")),
            pick("T1", "Storage", "Case Pick", None),
            pick("T2", "Storage", "Case Pick", Some("S-002")),
            pick("T3", "Storage", "Case Pick", Some("PP10")),
        ];
        let filtered = filter_picks(&rows, &AnalysisConfig::default());

        let trips: Vec<&str> = filtered.rows.iter().map(|r| r.trip.as_str()).collect();
        assert_eq!(trips, vec!["T2"]);
        assert_eq!(filtered.summary.excluded_trips, vec!["T1", "T3"]);
        assert_eq!(filtered.summary.dropped_by_staging, 4);
        assert_eq!(filtered.summary.retained_rows, 1);
        assert_eq!(filtered.summary.input_rows, 5);
    }

    #[test]
    fn test_staging_rows_already_filtered_do_not_poison() {
        // the PP09 row is outside storage, so it never reaches the staging check
        let rows = vec![
            pick("T1", "Dock", "Case Pick", Some("PP09")),
            pick("T1", "Storage", "Case Pick", None),
        ];
        let filtered = filter_picks(&rows, &AnalysisConfig::default());
        assert_eq!(filtered.rows.len(), 1);
        assert!(filtered.summary.excluded_trips.is_empty());
    }
}
