use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot derive output file names from '{}': the path has no file name", path.display())]
    InvalidInputPath{path: PathBuf},

    #[error("Failed to remove intermediate file {}", path.display())]
    RemoveIntermediate{path: PathBuf, #[source] source: std::io::Error},
}
