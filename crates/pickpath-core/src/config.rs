use crate::types::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Y positions of the cross aisles a picker can use to change aisles
pub const CROSSOVER_YS: [f64; 4] = [109.0, 1895.0, 3025.0, 3885.0];
/// Layout units per reporting unit (inches to feet)
pub const UNIT_DIVISOR: f64 = 12.0;
pub const EXCLUDED_TRIP_TYPE: &str = "Full Pull";
pub const REQUIRED_WHSE_AREA: &str = "Storage";
pub const EXCLUDED_PICK_SLOTS: [&str; 2] = ["PP09", "PP10"];
pub const EXCLUDED_CATEGORY: &str = "Full Pull trip";

/// Facility constants used by the filter and the distance model.
///
/// Every field defaults to the values of the reference facility, so an empty
/// config section behaves exactly like the built-in constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub crossover_ys: Vec<f64>,
    pub unit_divisor: f64,
    pub excluded_trip_type: String,
    pub required_whse_area: String,
    pub excluded_pick_slots: Vec<String>,
    pub excluded_category: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            crossover_ys: CROSSOVER_YS.to_vec(),
            unit_divisor: UNIT_DIVISOR,
            excluded_trip_type: EXCLUDED_TRIP_TYPE.to_string(),
            required_whse_area: REQUIRED_WHSE_AREA.to_string(),
            excluded_pick_slots: EXCLUDED_PICK_SLOTS.iter().map(|s| s.to_string()).collect(),
            excluded_category: EXCLUDED_CATEGORY.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Rejects settings the distance model cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.crossover_ys.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "At least one crossover row must be configured".to_string(),
            ));
        }

        if let Some(y) = self.crossover_ys.iter().find(|y| !y.is_finite()) {
            return Err(AnalysisError::InvalidInput(format!(
                "Crossover row {} is not a finite number",
                y
            )));
        }

        if !self.unit_divisor.is_finite() || self.unit_divisor <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Unit divisor must be positive, got {}",
                self.unit_divisor
            )));
        }

        Ok(())
    }
}
