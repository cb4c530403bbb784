mod fixture;
pub use fixture::Fixture;

/// Read a tab-separated table as a list of rows.
pub fn read_table(path: &std::path::Path) -> Vec<Vec<String>> {
    std::fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to open {path:?}"))
        .lines()
        .map(|line| line.split('\t').map(ToString::to_string).collect())
        .collect()
}

/// Compare an obtained file against its expected counterpart within `tests/test-data/expect`
#[macro_export]
macro_rules! validate_file {
    ($ref_file:expr, $obtained_file:expr) => {
        let want = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test-data/expect/", $ref_file))
            .unwrap_or_else(|_| panic!("Failed to open {:?}", $ref_file));
        let obtained = $obtained_file;
        let got  = std::fs::read_to_string(&obtained)
            .unwrap_or_else(|_| panic!("Failed to open {:?}", obtained));
        assert_eq!(want, got)
    };
}
