use std::{fs::File, io::{BufRead, BufReader}, path::{Path, PathBuf}};

use anyhow::Result;
use log::trace;

use located_error::LocatedError;
use variant::Header;

pub mod error;
pub use error::TableError;

/// Reader for tab-separated variant summary tables.
/// - source: Boxed `BufRead`, positioned right after the header line.
/// - path  : the path of the table, used for error reporting.
/// - header: the parsed header line.
pub struct TableReader<'a> {
    source: Box<dyn BufRead + 'a>,
    path  : PathBuf,
    header: Header,
}

impl<'a> TableReader<'a> {
    /// Open a table and parse its header line.
    ///
    /// # Errors
    /// - `OpenFile` if `path` targets an invalid location (`FileNotFound` or `PermissionDenied`)
    /// - `EmptyTable` if the file does not even contain a header line.
    pub fn open(path: &Path) -> Result<TableReader<'a>> {
        let file = File::open(path)
            .map_err(|source| TableError::OpenFile { path: path.to_path_buf(), source })
            .loc("While opening variant table")?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Build a `TableReader` on top of any buffered source. `path` is only used for error reporting.
    ///
    /// # Errors
    /// - `EmptyTable` if the source does not even contain a header line.
    /// - `ReadLine` if the header line cannot be read.
    pub fn from_reader(source: impl BufRead + 'a, path: &Path) -> Result<TableReader<'a>> {
        let mut source: Box<dyn BufRead + 'a> = Box::new(source);
        let mut line = String::new();
        let bytes = source.read_line(&mut line)
            .map_err(|source| TableError::ReadLine { path: path.to_path_buf(), line: 1, source })
            .loc("While reading table header")?;

        if bytes == 0 {
            return Err(TableError::EmptyTable { path: path.to_path_buf() }).loc("While reading table header")
        }

        let header = Header::parse(line.trim_end_matches(['\n', '\r']));
        trace!("Header of {}: {:?}", path.display(), header.columns());
        Ok(TableReader { source, path: path.to_path_buf(), header })
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Iterate over the records of the table, as `(line number, line)` pairs.
    ///
    /// # Behavior
    /// - Line numbers are 1-based and count the header line: the first record is line 2.
    /// - Empty lines are skipped.
    ///
    /// # Errors
    /// - Yields a `ReadLine` error if any line cannot be read, or is not valid UTF-8.
    pub fn records(&mut self) -> Box<dyn Iterator<Item = Result<(usize, String)>> + '_> {
        let path = &self.path;
        let records = (&mut self.source)
            .lines()
            .enumerate()
            .map(move |(i, line)| {
                let line_no = i + 2;
                line.map(|line| (line_no, line))
                    .map_err(|source| TableError::ReadLine { path: path.clone(), line: line_no, source })
                    .loc("While reading variant table")
            })
            .filter(|record| !matches!(record, Ok((_, line)) if line.is_empty()));
        Box::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn read_header_and_records() -> Result<()> {
        let table = "gene\tpatient_ID\r\nTP53\tP1_T\r\n\nKRAS\tP2_T\n";
        let mut reader = TableReader::from_reader(Cursor::new(table), Path::new("mem.tsv"))?;
        assert_eq!(reader.header().columns(), ["gene", "patient_ID"]);

        let records = reader.records().collect::<Result<Vec<_>>>()?;
        assert_eq!(records, vec![(2, "TP53\tP1_T".to_string()), (4, "KRAS\tP2_T".to_string())]);
        Ok(())
    }

    #[test]
    fn read_borrowed_source() -> Result<()> {
        let table = String::from("gene\tposition\nBRAF\t140453136\nNRAS\t115256529\n");
        let mut reader = TableReader::from_reader(table.as_bytes(), Path::new("borrowed.tsv"))?;
        let positions = reader.records()
            .map(|record| record.map(|(_, line)| line.split('\t').nth(1).map(ToString::to_string)))
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(positions, [Some("140453136".to_string()), Some("115256529".to_string())]);

        // Exhausted sources yield nothing more.
        assert_eq!(reader.records().count(), 0);
        Ok(())
    }

    #[test]
    fn empty_table() {
        let err = TableReader::from_reader(Cursor::new(""), Path::new("empty.tsv"))
            .err()
            .expect("An empty table should be rejected");
        assert!(matches!(err.downcast_ref::<TableError>(), Some(TableError::EmptyTable { .. })));
    }

    #[test]
    fn open_missing_file() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let err = TableReader::open(&tmpdir.path().join("missing.tsv"))
            .err()
            .expect("A missing file should be rejected");
        assert!(matches!(err.downcast_ref::<TableError>(), Some(TableError::OpenFile { .. })));
        Ok(())
    }

    #[test]
    fn open_file() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("variants.tsv");
        let mut file = File::create(&path)?;
        writeln!(file, "gene\tposition\nBRAF\t140453136")?;
        drop(file);

        let mut reader = TableReader::open(&path)?;
        assert_eq!(reader.header().len(), 2);
        assert_eq!(reader.records().count(), 1);
        Ok(())
    }
}
