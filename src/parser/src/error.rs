use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("File {0} does not exist")]
    MissingFile(String),

    #[error("{0} is not a file")]
    NotAFile(String),

    #[error("Failed to serialize command line arguments")]
    Serialize(#[from] serde_yaml::Error),
}
