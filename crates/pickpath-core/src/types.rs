use crate::config::AnalysisConfig;
use serde::{Deserialize, Serialize};

/// A position on the facility floor plan, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One row of the slot layout table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRow {
    #[serde(alias = "Current_Prime_Item")]
    pub item: String,
    #[serde(alias = "Slot_ID")]
    pub slot_id: String,
    #[serde(alias = "Pick_Seq")]
    pub pick_seq: i64,
    #[serde(alias = "X")]
    pub x: f64,
    #[serde(alias = "Y")]
    pub y: f64,
}

/// One raw pick observation, before filtering and slot resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickRow {
    #[serde(alias = "Trip")]
    pub trip: String,
    #[serde(alias = "Trip_Category", default)]
    pub trip_category: Option<String>,
    #[serde(alias = "Item")]
    pub item: String,
    #[serde(alias = "Whse_Area")]
    pub whse_area: String,
    #[serde(alias = "Trip_Type")]
    pub trip_type: String,
    /// Staging/pick location code, only present when the source table has the column
    #[serde(alias = "Pick_Slot", default)]
    pub pick_slot: Option<String>,
}

/// A pick joined against the slot index. Unmapped items keep `None` everywhere.
#[derive(Debug, Clone)]
pub struct PickRecord<'a> {
    pub row: &'a PickRow,
    pub slot_id: Option<&'a str>,
    pub pick_seq: Option<i64>,
    pub coords: Option<Point>,
}

/// Distance totals for a single trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResult {
    pub trip_category: String,
    pub trip: String,
    pub total_distance: f64,
    pub average_distance: f64,
    pub num_picks: usize,
}

/// Descriptive statistics over the total distance of every trip in a category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub trips: usize,
    pub mean: f64,
    pub median: f64,
    pub p90: f64,
}

/// Result table for one trip category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    /// Sanitized title used when the table is written as its own sheet/file
    pub sheet_name: String,
    pub trips: Vec<TripResult>,
    pub stats: CategoryStats,
}

/// Row counts produced by the pick filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub input_rows: usize,
    pub dropped_by_type_or_area: usize,
    pub dropped_by_staging: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub excluded_trips: Vec<String>,
    pub retained_rows: usize,
}

/// Input: layout and pick tables plus optional facility overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub layout: Vec<LayoutRow>,
    pub picks: Vec<PickRow>,
    #[serde(default)]
    pub config: AnalysisConfig,
}

/// Output: one table per category plus every trip row combined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub categories: Vec<CategoryReport>,
    /// Concatenation of every category's trip rows, in category order
    pub trips: Vec<TripResult>,
    pub filter: FilterSummary,
}

/// Error type for analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column {column} (row {row})")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
