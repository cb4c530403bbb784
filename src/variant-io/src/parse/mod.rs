use std::{ffi::OsString, fs, path::{Path, PathBuf}};

use anyhow::Result;
use log::{debug, trace};

use located_error::LocatedError;

mod error;
pub use error::ParseError;

/// Extension of intermediate tables.
pub const INTERMEDIATE_EXT: &str = "tmp";
/// Extension of finalized, occurrence-annotated tables.
pub const FINAL_EXT: &str = "txt";

/// Predefined output filenames, derived from the path of the input variant table.
///
/// With `<stem>` being the input path stripped from its last extension:
/// - `filtered`: `<stem>.filtered.tmp`
/// - `somatic` : `<stem>.filtered.somatic.tmp`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub filtered: PathBuf,
    pub somatic : PathBuf,
}

impl OutputFiles {
    /// Derive output filenames from the input table path. Outputs are written alongside the input.
    ///
    /// # Errors
    /// - `InvalidInputPath` if `input` does not end with a file name.
    pub fn from_input(input: &Path) -> Result<Self> {
        if input.file_name().is_none() {
            return Err(ParseError::InvalidInputPath { path: input.to_path_buf() })
                .loc("While deriving output filenames")
        }
        let filtered = with_suffix(&input.with_extension(""), "filtered", INTERMEDIATE_EXT);
        let somatic  = with_suffix(&filtered.with_extension(""), "somatic", INTERMEDIATE_EXT);
        trace!("Output File(s): {filtered:?}, {somatic:?}");
        Ok(Self { filtered, somatic })
    }
}

/// Append `.{suffix}.{ext}` to a path, without interpreting any of its existing dots.
fn with_suffix(stem: &Path, suffix: &str, ext: &str) -> PathBuf {
    let mut path = OsString::from(stem.as_os_str());
    path.push(format!(".{suffix}.{ext}"));
    PathBuf::from(path)
}

/// Name of the finalized table of an intermediate file: `.tmp` -> `.txt`.
/// Only the extension is replaced; dots within parent directories are left untouched.
#[must_use]
pub fn finalized_path(intermediate: &Path) -> PathBuf {
    intermediate.with_extension(FINAL_EXT)
}

/// Remove an intermediate file, once its finalized counterpart has been written.
///
/// # Errors
/// - `RemoveIntermediate` if the file cannot be deleted.
pub fn remove_intermediate(path: &Path) -> Result<()> {
    debug!("Removing intermediate file {}", path.display());
    fs::remove_file(path)
        .map_err(|source| ParseError::RemoveIntermediate { path: path.to_path_buf(), source })
        .loc("While cleaning up intermediate files")
}
