use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Required column '{0}' is missing from the table header")]
    MissingColumn(String),

    #[error("Line {line} carries {found} fields, while the header defines {expected} columns")]
    FieldCount{line: usize, expected: usize, found: usize},

    #[error("Invalid value '{value}' in column '{column}': expected a number or '{}'", crate::NOT_SEQUENCED)]
    InvalidReading{column: String, value: String},
}
