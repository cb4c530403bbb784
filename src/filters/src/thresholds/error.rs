use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThresholdError {
    #[error("Missing required threshold '{key}' within section [{section}]")]
    MissingKey{section: String, key: String},

    #[error("Threshold '{key}' of section [{section}] is not a valid number: '{value}'")]
    InvalidValue{section: String, key: String, value: String},

    #[error("Malformed line n°{line} in thresholds file: '{content}'")]
    MalformedLine{line: usize, content: String},

    #[error("Indented line n°{line} in thresholds file: '{content}'. Multi-line values are not supported")]
    IndentedLine{line: usize, content: String},

    #[error("Key-value pair found before any [section] header, at line n°{line}")]
    MissingSectionHeader{line: usize},

    #[error("Failed to open thresholds file {}", path.display())]
    OpenFile{path: PathBuf, #[source] source: std::io::Error},

    #[error("Failed to deserialize yaml thresholds file")]
    ParseYaml(#[from] serde_yaml::Error),
}
