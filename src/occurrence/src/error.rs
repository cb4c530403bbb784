use thiserror::Error;

use variant::VariantKey;

#[derive(Error, Debug)]
pub enum OccurrenceError {
    #[error("Gene '{0}' was not found within the occurrence tables")]
    MissingGene(String),

    #[error("Variant '{0}' was not found within the occurrence tables")]
    MissingVariant(VariantKey),
}
