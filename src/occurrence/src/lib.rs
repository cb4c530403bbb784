mod error;
pub use error::OccurrenceError;

pub mod tables;
pub use tables::{KeyColumns, OccurrenceCounts, OccurrenceTables};

pub mod annotate;
pub use annotate::{annotate_fields, recalculate, rewrite, GENE_PATIENTS, GENE_SNVS, SNV_PATIENTS};
