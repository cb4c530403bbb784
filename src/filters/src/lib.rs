pub mod thresholds;
pub use thresholds::{ThresholdSet, ThresholdSource, ThresholdError, TumorThresholds, NormalThresholds};

pub mod quality;
pub use quality::QualityFilter;

pub mod somatic;
pub use somatic::SomaticFilter;

pub mod filtering;
pub use filtering::{filter_table, FilterSummary, VariantFilter, IN_STRELKA};
