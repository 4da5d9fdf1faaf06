//! Pick-trip travel distance estimation.
//!
//! Builds a slot index from a warehouse layout, filters raw pick data down to
//! representative storage trips, walks every trip in pick-sequence order and
//! reports distance statistics per trip category.

pub mod analyzer;
pub mod config;
pub mod distance;
pub mod filter;
pub mod report;
pub mod slots;
pub mod types;

pub use analyzer::Analyzer;
pub use config::AnalysisConfig;
pub use distance::DistanceModel;
pub use slots::SlotIndex;
pub use types::*;
