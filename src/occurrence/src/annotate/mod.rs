use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use located_error::LocatedError;
use variant_io::{parse::finalized_path, read::TableReader, write::GenericWriter};

use crate::{KeyColumns, OccurrenceTables};

/// Name of the inserted gene-level distinct-patient count column.
pub const GENE_PATIENTS: &str = "filtered_num_patients_gene_level";
/// Name of the inserted gene-level distinct-variant count column.
pub const GENE_SNVS: &str = "filtered_num_SNVs_gene_level";
/// Name of the inserted variant-level distinct-patient count column.
pub const SNV_PATIENTS: &str = "filtered_num_patients_SNV_level";

/// Number of original columns preceding the variant-level count column.
const SNV_LEVEL_OFFSET: usize = 7;

/// Insert occurrence values within a record (or header), at fixed positions:
/// ```text
/// [c0, gene_patients, gene_snvs, c1..c6, snv_patients, c7..]
/// ```
/// Records shorter than 7 fields get `snv_patients` appended after their last field.
pub fn annotate_fields<T: Clone>(fields: &[T], gene_patients: T, gene_snvs: T, snv_patients: T) -> Vec<T> {
    let split = fields.len().min(SNV_LEVEL_OFFSET);
    let mut annotated = Vec::with_capacity(fields.len() + 3);
    annotated.extend(fields.first().cloned());
    annotated.push(gene_patients);
    annotated.push(gene_snvs);
    annotated.extend_from_slice(fields.get(1..split).unwrap_or_default());
    annotated.push(snv_patients);
    annotated.extend_from_slice(&fields[split..]);
    annotated
}

/// Write an occurrence-annotated copy of the `input` table into `output`.
/// Returns the number of records written.
///
/// # Errors
/// - If `input` cannot be read, or `output` cannot be written.
/// - `MissingColumn` or `FieldCount` if `input` is malformed.
/// - `MissingGene` or `MissingVariant` if a record is absent from `tables`.
pub fn rewrite(input: &Path, output: &Path, tables: &OccurrenceTables) -> Result<usize> {
    let mut reader = TableReader::open(input)?;
    let header     = reader.header().clone();
    let columns    = KeyColumns::resolve(&header)
        .with_loc(|| format!("While resolving variant key columns of {}", input.display()))?;

    let mut writer = GenericWriter::create(output)?;
    let names: Vec<&str> = header.columns().iter().map(String::as_str).collect();
    writer.write_fields(annotate_fields(names.as_slice(), GENE_PATIENTS, GENE_SNVS, SNV_PATIENTS))?;

    let mut rows = 0;
    for record in reader.records() {
        let (line_no, line) = record?;
        let loc_msg = || format!("At line {line_no} of {}", input.display());

        let fields = header.split(line_no, &line).with_loc(loc_msg)?;
        let counts = tables.counts(&columns.variant_key(&fields)).with_loc(loc_msg)?;
        let [gene_patients, gene_snvs, snv_patients] = [counts.gene_patients, counts.gene_snvs, counts.snv_patients]
            .map(|count| count.to_string());
        writer.write_fields(annotate_fields(fields.as_slice(), gene_patients.as_str(), gene_snvs.as_str(), snv_patients.as_str()))?;
        rows += 1;
    }
    writer.finish()?;
    Ok(rows)
}

/// Recompute occurrences of a filtered intermediate table, and write the annotated table alongside,
/// with its `.tmp` extension replaced by `.txt`. Returns the path of the annotated table.
///
/// # Errors
/// - See [`OccurrenceTables::scan`] and [`rewrite`].
pub fn recalculate(intermediate: &Path) -> Result<PathBuf> {
    info!("Recalculating occurrences of {}", intermediate.display());
    let tables = OccurrenceTables::scan(intermediate)?;
    let output = finalized_path(intermediate);
    let rows   = rewrite(intermediate, &output, &tables)
        .with_loc(|| format!("While annotating occurrences of {}", intermediate.display()))?;
    info!("Wrote {rows} occurrence-annotated records into {}", output.display());
    Ok(output)
}
