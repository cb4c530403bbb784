extern crate parser;

use std::path::{Path, PathBuf};

use anyhow::Result;
use parser::{Cli, Pairing};

use filters::{filter_table, FilterSummary, QualityFilter, SomaticFilter, ThresholdSet};
use located_error::LocatedError;
use variant_io::parse::{remove_intermediate, OutputFiles};

#[macro_use]
extern crate log;

/// Files produced by a complete run, along with the row counts of each filtering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutputs {
    /// Quality-filtered table, prior to occurrence annotation. Retained as a deliverable.
    pub filtered_intermediate: PathBuf,
    /// Quality-filtered, occurrence-annotated table.
    pub filtered: PathBuf,
    /// Somatic-filtered, occurrence-annotated table. Only produced for paired samples.
    pub somatic: Option<PathBuf>,
    pub quality_summary: FilterSummary,
    pub somatic_summary: Option<FilterSummary>,
}

/// Unpack command line arguments and run the filtering pipeline.
///
/// # Errors
/// - See [`filter_variants`]
pub fn run(cli: &Cli) -> Result<PipelineOutputs> {
    filter_variants(&cli.input_file, &cli.filters, cli.pairing)
}

/// Run the complete pipeline over a variant summary table:
/// 1. Load quality and somatic thresholds.
/// 2. Quality-filter `input` into `<stem>.filtered.tmp`
/// 3. For paired samples only, somatic-filter the previous output into `<stem>.filtered.somatic.tmp`
/// 4. Recompute occurrences of each filtered table into its `.txt` counterpart. The somatic `.tmp`
///    table is then removed. The quality-filtered `.tmp` table is kept.
///
/// # Errors
/// Any error is fatal, and stops the pipeline at the stage where it happened:
/// - Configuration errors, if any threshold is missing or invalid. No output is produced.
/// - Malformed records or missing columns within `input`.
/// - I/O errors.
pub fn filter_variants(input: &Path, filters: &Path, pairing: Pairing) -> Result<PipelineOutputs> {
    let start = chrono::Local::now();
    info!("Quality and somatic filtering starts at: {}", start.format("%Y-%m-%d %H:%M:%S"));

    // ----------------------------- Load thresholds, before touching any output file.
    let thresholds = ThresholdSet::load(filters)?;
    let files      = OutputFiles::from_input(input)?;

    // ----------------------------- Quality filtering
    let quality_summary = filter_table::<QualityFilter>(input, &files.filtered, &thresholds)
        .loc("While applying quality filters")?;

    // ----------------------------- Somatic filtering (paired samples only)
    let somatic_summary = match pairing {
        Pairing::Paired   => Some(
            filter_table::<SomaticFilter>(&files.filtered, &files.somatic, &thresholds)
                .loc("While applying somatic filters")?
        ),
        Pairing::Unpaired => {
            info!("Unpaired sample: skipping somatic filtering.");
            None
        },
    };

    // ----------------------------- Recalculate occurrences.
    let filtered = occurrence::recalculate(&files.filtered)
        .loc("While recalculating occurrences of quality-filtered variants")?;

    // A stale somatic table left over by a previous paired run is never picked up.
    let somatic = match somatic_summary.is_some() {
        true  => {
            let somatic = occurrence::recalculate(&files.somatic)
                .loc("While recalculating occurrences of somatic variants")?;
            remove_intermediate(&files.somatic)?;
            Some(somatic)
        },
        false => None,
    };

    let end = chrono::Local::now();
    info!("Quality and somatic filtering ends at: {} (elapsed: {}s)",
        end.format("%Y-%m-%d %H:%M:%S"),
        (end - start).num_milliseconds() as f64 / 1000.0
    );

    Ok(PipelineOutputs { filtered_intermediate: files.filtered, filtered, somatic, quality_summary, somatic_summary })
}
