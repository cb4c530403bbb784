use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to open file {}", path.display())]
    OpenFile{path: PathBuf, #[source] source: std::io::Error},

    #[error("{} is empty: a header line is required", path.display())]
    EmptyTable{path: PathBuf},

    #[error("Failed to read line {line} of {}", path.display())]
    ReadLine{path: PathBuf, line: usize, #[source] source: std::io::Error},
}
