use std::{env, fs, path::{Path, PathBuf}, ops::Deref, fmt::{self, Formatter, Display}};
use tempfile::{self, TempDir};

pub const TEST_DATA_DIR: &str = "./tests/test-data";

/// A copy of a test-data file, living within its own temporary directory.
/// Outputs written alongside the copy are removed along with the fixture.
pub struct Fixture {
    path: PathBuf,
    source: PathBuf,
    _tempdir: TempDir,
}

impl Fixture {
    pub fn blank(fixture_filename: &str) -> Self {
        // First, figure out the right file in `tests/test-data/`:
        let root_dir = &env::var("CARGO_MANIFEST_DIR").expect("$CARGO_MANIFEST_DIR");
        let mut source = PathBuf::from(root_dir);
        source.push(TEST_DATA_DIR);
        source.push(fixture_filename);

        // The "real" path of the file is going to be under a temporary directory:
        let tempdir = tempfile::tempdir().expect("Failed to generate temp directory");
        let path = tempdir.path().join(fixture_filename);

        Fixture { _tempdir: tempdir, source, path }
    }

    pub fn copy(fixture_filename: &str) -> Self {
        let fixture = Fixture::blank(fixture_filename);
        fs::copy(&fixture.source, &fixture.path).expect("Failed to copy Fixture files.");
        fixture
    }

    /// Path of a sibling file, within the temporary directory of this fixture.
    pub fn sibling(&self, filename: &str) -> PathBuf {
        self.path.with_file_name(filename)
    }
}

impl Deref for Fixture {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.path.deref()
    }
}

impl Display for Fixture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.to_str().expect("Invalid path (non UTF8 characters ?)"))
    }
}
