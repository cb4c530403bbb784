use std::{fmt::{self, Display, Formatter}, path::Path};

use anyhow::Result;
use log::{debug, info};

use located_error::LocatedError;
use variant::{Header, RecordError, Row};
use variant_io::{read::TableReader, write::GenericWriter};

use crate::ThresholdSet;

/// Value of the `in_strelka` column for variants reported by the Strelka caller.
/// Such variants bypass every filter.
pub const IN_STRELKA: &str = "in_strelka";

/// A record-level predicate over variant summary tables.
pub trait VariantFilter: Sized {
    /// Human readable name of the filter, for logging purposes.
    const NAME: &'static str;

    /// Resolve every column required by the filter.
    ///
    /// # Errors
    /// - `MissingColumn` if `header` lacks any of them.
    fn from_header(header: &Header) -> Result<Self, RecordError>;

    /// Decide whether `row` should be kept.
    ///
    /// # Errors
    /// - `InvalidReading` if any consulted field is neither numeric nor `na`.
    fn passes(&self, thresholds: &ThresholdSet, row: &Row) -> Result<bool, RecordError>;
}

/// Row counts of a single filtering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub name : &'static str,
    pub total: usize,
    pub kept : usize,
}

impl Display for FilterSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} filter: kept {}/{} records", self.name, self.kept, self.total)
    }
}

/// Apply filter `F` over every record of the `input` table, and write the header, along with the
/// typed rendering of every retained record, into `output`.
///
/// # Errors
/// - If `input` cannot be read, or `output` cannot be written.
/// - `MissingColumn` if the header of `input` lacks any column required by `F`.
/// - `FieldCount` or `InvalidReading` on the first malformed record.
pub fn filter_table<F: VariantFilter>(input: &Path, output: &Path, thresholds: &ThresholdSet) -> Result<FilterSummary> {
    info!("Applying {} filter on {}", F::NAME, input.display());
    let mut reader = TableReader::open(input)?;
    let header     = reader.header().clone();
    let filter     = F::from_header(&header)
        .with_loc(|| format!("While resolving the columns required by the {} filter in {}", F::NAME, input.display()))?;

    let mut writer = GenericWriter::create(output)?;
    writer.write_line(&header)?;

    let mut summary = FilterSummary { name: F::NAME, total: 0, kept: 0 };
    for record in reader.records() {
        let (line_no, line) = record?;
        let loc_msg = || format!("At line {line_no} of {}", input.display());

        let row = Row::typed(&header, line_no, &line).with_loc(loc_msg)?;
        summary.total += 1;
        if filter.passes(thresholds, &row).with_loc(loc_msg)? {
            writer.write_line(&row)?;
            summary.kept += 1;
        }
    }
    writer.finish()?;

    debug!("Wrote {} filtered records into {}", summary.kept, output.display());
    info!("{summary}");
    Ok(summary)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{thresholds::tests::default_thresholds, QualityFilter, SomaticFilter};
    use itertools::Itertools;

    /// Columns of a complete variant summary table, along with the values of a well-covered,
    /// somatic, non-strelka variant sequenced in both assays.
    const DEFAULT_RECORD: [(&str, &str); 19] = [
        ("gene",       "TP53"),
        ("chromosome", "17"),
        ("position",   "7577120"),
        ("ref_base",   "C"),
        ("alt_base",   "T"),
        ("patient_ID", "P1_T"),
        ("in_strelka", "not_in_strelka"),
        ("t_DNA_cov",  "30"),
        ("t_DNA_AltC", "10"),
        ("t_DNA_RefC", "20"),
        ("t_DNA_AF",   "0.33"),
        ("t_RNA_cov",  "40"),
        ("t_RNA_AltC", "12"),
        ("t_RNA_RefC", "28"),
        ("t_RNA_AF",   "0.3"),
        ("n_DNA_AF",   "0.01"),
        ("n_DNA_AltC", "0"),
        ("n_RNA_AF",   "0.02"),
        ("n_RNA_AltC", "1"),
    ];

    /// Raw tab-separated line of the default record, with `overrides` applied in order.
    pub(crate) fn raw_record(overrides: &[(&str, &str)]) -> String {
        DEFAULT_RECORD.iter()
            .map(|(column, default)| {
                overrides.iter().rev()
                    .find(|(name, _)| name == column)
                    .map_or(*default, |(_, value)| *value)
            })
            .join("\t")
    }

    pub(crate) fn raw_header() -> String {
        DEFAULT_RECORD.iter().map(|(column, _)| column).join("\t")
    }

    /// Typed header and row of the default record, with `overrides` applied in order.
    pub(crate) fn record(overrides: &[(&str, &str)]) -> (Header, Row) {
        let header = Header::parse(&raw_header());
        let row    = Row::typed(&header, 2, &raw_record(overrides)).expect("Invalid test record");
        (header, row)
    }

    fn write_table(dir: &Path, records: &[String]) -> std::io::Result<std::path::PathBuf> {
        let path = dir.join("variants.tsv");
        let mut contents = raw_header();
        for record in records {
            contents.push('\n');
            contents.push_str(record);
        }
        contents.push('\n');
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn quality_pass_over_table() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let input  = write_table(tmpdir.path(), &[
            raw_record(&[]),
            raw_record(&[("t_DNA_cov", "5"), ("t_RNA_AltC", "2")]),
            raw_record(&[("t_DNA_cov", "na"), ("t_RNA_AF", "0.333")]),
        ])?;
        let output = tmpdir.path().join("variants.filtered.tmp");

        let summary = filter_table::<QualityFilter>(&input, &output, &default_thresholds())?;
        assert_eq!(summary, FilterSummary { name: "quality", total: 3, kept: 2 });

        let written = std::fs::read_to_string(&output)?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], raw_header());
        // Typed rendering: floats are written with two decimals.
        assert!(lines[1].contains("\t0.33\t") && lines[1].contains("\t0.30\t"));
        assert!(lines[2].contains("\tna\t") && lines[2].contains("\t0.33\t"));
        Ok(())
    }

    #[test]
    fn somatic_pass_over_table() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let input  = write_table(tmpdir.path(), &[
            raw_record(&[("n_DNA_AF", "0.4"), ("n_DNA_AltC", "12")]),
            raw_record(&[("n_DNA_AF", "0.4"), ("n_DNA_AltC", "12"), ("in_strelka", "in_strelka")]),
        ])?;
        let output = tmpdir.path().join("variants.filtered.somatic.tmp");

        let summary = filter_table::<SomaticFilter>(&input, &output, &default_thresholds())?;
        assert_eq!((summary.total, summary.kept), (2, 1));
        Ok(())
    }

    #[test]
    fn empty_table_keeps_header() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let input  = write_table(tmpdir.path(), &[])?;
        let output = tmpdir.path().join("variants.filtered.tmp");

        let summary = filter_table::<QualityFilter>(&input, &output, &default_thresholds())?;
        assert_eq!((summary.total, summary.kept), (0, 0));
        assert_eq!(std::fs::read_to_string(&output)?, format!("{}\n", raw_header()));
        Ok(())
    }

    #[test]
    fn missing_column_is_fatal() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let input  = tmpdir.path().join("variants.tsv");
        std::fs::write(&input, "gene\tin_strelka\nTP53\tin_strelka\n")?;

        let err = filter_table::<SomaticFilter>(&input, &tmpdir.path().join("out.tmp"), &default_thresholds())
            .expect_err("Missing columns should be rejected");
        assert!(matches!(err.downcast_ref::<RecordError>(), Some(RecordError::MissingColumn(_))));
        Ok(())
    }

    #[test]
    fn malformed_record_is_fatal() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let input  = write_table(tmpdir.path(), &[raw_record(&[]), "TP53\t17".to_string()])?;

        let err = filter_table::<QualityFilter>(&input, &tmpdir.path().join("out.tmp"), &default_thresholds())
            .expect_err("Truncated records should be rejected");
        assert!(matches!(err.downcast_ref::<RecordError>(), Some(RecordError::FieldCount { line: 3, found: 2, .. })));
        Ok(())
    }
}
