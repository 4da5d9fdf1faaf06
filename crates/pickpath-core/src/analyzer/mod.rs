use crate::config::AnalysisConfig;
use crate::distance::DistanceModel;
use crate::filter::filter_picks;
use crate::report::unique_sheet_name;
use crate::slots::SlotIndex;
use crate::types::*;
use std::collections::HashSet;
use tracing::info;

mod summary;
mod trips;

pub use summary::{category_stats, percentile};
pub use trips::summarize_trip;

/// Estimates walking distance per pick trip and rolls it up per trip category.
pub struct Analyzer {
    request: AnalysisRequest,
    index: SlotIndex,
}

impl Analyzer {
    /// Validates the request and builds the slot index once.
    pub fn new(request: AnalysisRequest) -> Result<Self> {
        request.config.validate()?;

        if let Some(row) = request
            .layout
            .iter()
            .find(|row| !row.x.is_finite() || !row.y.is_finite())
        {
            return Err(AnalysisError::InvalidInput(format!(
                "Slot '{}' has non-finite coordinates",
                row.slot_id
            )));
        }

        let index = SlotIndex::build(&request.layout);
        info!(
            "Loaded {} item-to-slot mappings covering {} slots",
            index.item_count(),
            index.slot_count()
        );

        Ok(Self { request, index })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.request.config
    }

    pub fn distance_model(&self) -> DistanceModel<'_> {
        DistanceModel::new(&self.index, &self.request.config)
    }

    /// Runs the whole pipeline: filter, group by category, reduce each trip.
    pub fn analyze(&self) -> AnalysisResult {
        let filtered = filter_picks(&self.request.picks, self.config());
        let categories = self.categories(&filtered.rows);

        let mut taken = HashSet::new();
        let reports: Vec<CategoryReport> = categories
            .into_iter()
            .map(|category| {
                info!("Analyzing Trip Category: {}", category);
                let trips = self.analyze_category(category, &filtered.rows);
                let stats = category_stats(&trips);
                info!(
                    trips = stats.trips,
                    mean = stats.mean,
                    median = stats.median,
                    p90 = stats.p90,
                    "Finished category {}",
                    category
                );

                CategoryReport {
                    category: category.to_string(),
                    sheet_name: unique_sheet_name(category, &mut taken),
                    trips,
                    stats,
                }
            })
            .collect();

        let trips = reports
            .iter()
            .flat_map(|report| report.trips.iter().cloned())
            .collect();

        AnalysisResult {
            categories: reports,
            trips,
            filter: filtered.summary,
        }
    }

    /// Distinct categories in order of first appearance, minus the excluded label.
    fn categories<'a>(&self, rows: &[&'a PickRow]) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        rows.iter()
            .filter_map(|row| row.trip_category.as_deref())
            .filter(|category| *category != self.config().excluded_category)
            .filter(|category| seen.insert(*category))
            .collect()
    }
}
