use anyhow::{Context, Result};
use pickpath_core::{AnalysisResult, TripResult};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "warehouse_analysis_results";
pub const COMBINED_FILE: &str = "trip_analysis_results_ALL_CATEGORIES.csv";

const HEADERS: [&str; 5] = [
    "Trip_Category",
    "Trip",
    "Total Distance",
    "Average Distance",
    "Num Picks",
];

/// Writes one CSV per category plus the combined table. Returns the paths written.
pub fn write_reports(dir: &Path, result: &AnalysisResult) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::new();
    for report in &result.categories {
        let path = dir.join(format!("{}.csv", report.sheet_name));
        write_trips(&path, &report.trips)?;
        written.push(path);
    }

    let combined = dir.join(COMBINED_FILE);
    write_trips(&combined, &result.trips)?;
    written.push(combined);

    Ok(written)
}

fn write_trips(path: &Path, trips: &[TripResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(HEADERS)?;
    for trip in trips {
        writer.write_record([
            trip.trip_category.clone(),
            trip.trip.clone(),
            trip.total_distance.to_string(),
            trip.average_distance.to_string(),
            trip.num_picks.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
