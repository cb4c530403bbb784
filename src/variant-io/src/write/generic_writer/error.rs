use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to create output file {}", path.display())]
    CreateFile{path: PathBuf, #[source] source: std::io::Error},

    #[error("Failed to write to file: inner writter return io error")]
    IOError(#[from] std::io::Error)
}
