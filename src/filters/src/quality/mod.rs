use log::trace;

use variant::{Assay, Column, Header, Reading, RecordError, Regime, Row};

use crate::{filtering::{VariantFilter, IN_STRELKA}, ThresholdSet, TumorThresholds};

/// Tumor sequencing columns of a single assay: `t_{DNA|RNA}_{cov|AltC|RefC|AF}`
#[derive(Debug, Clone)]
struct TumorColumns {
    coverage       : Column,
    alt_count      : Column,
    ref_count      : Column,
    allele_fraction: Column,
}

impl TumorColumns {
    fn resolve(header: &Header, assay: Assay) -> Result<Self, RecordError> {
        let column = |name: &str| header.column(&format!("t_{assay}_{name}"));
        Ok(Self {
            coverage       : column("cov")?,
            alt_count      : column("AltC")?,
            ref_count      : column("RefC")?,
            allele_fraction: column("AF")?,
        })
    }

    fn readings(&self, row: &Row, coverage: Reading) -> Result<TumorReadings, RecordError> {
        Ok(TumorReadings {
            coverage,
            alt_count      : row.reading(&self.alt_count)?,
            ref_count      : row.reading(&self.ref_count)?,
            allele_fraction: row.reading(&self.allele_fraction)?,
        })
    }
}

/// Tumor measurements of a single assay, for a single record.
#[derive(Debug, Clone, Copy)]
struct TumorReadings {
    coverage       : Reading,
    alt_count      : Reading,
    ref_count      : Reading,
    allele_fraction: Reading,
}

impl TumorReadings {
    /// Check that every tumor measurement reaches its minimal threshold.
    /// The summed ref+alt read count must cover at least `altref_total_percent` of the coverage.
    fn clears(&self, thresholds: &TumorThresholds) -> bool {
        let altref_total = self.ref_count + self.alt_count;
        self.coverage.at_least(thresholds.coverage)
            && self.alt_count.at_least(thresholds.alt_count)
            && self.allele_fraction.at_least(thresholds.allele_fraction)
            && self.coverage.value().is_some_and(|cov| altref_total.at_least(thresholds.altref_total_percent * cov))
    }
}

/// Keep variants with enough supporting tumor reads, in at least one of the sequenced assays.
#[derive(Debug, Clone)]
pub struct QualityFilter {
    in_strelka: Column,
    dna       : TumorColumns,
    rna       : TumorColumns,
}

impl QualityFilter {
    /// Evaluate the tumor readings of `assay`, using its already parsed coverage.
    fn assay_clears(&self, thresholds: &ThresholdSet, row: &Row, assay: Assay, coverage: Reading) -> Result<bool, RecordError> {
        let columns = match assay {
            Assay::Dna => &self.dna,
            Assay::Rna => &self.rna,
        };
        let readings = columns.readings(row, coverage)?;
        let clears = readings.clears(thresholds.tumor(assay));
        trace!("{assay} tumor readings {readings:?} -> {clears}");
        Ok(clears)
    }
}

impl VariantFilter for QualityFilter {
    const NAME: &'static str = "quality";

    fn from_header(header: &Header) -> Result<Self, RecordError> {
        Ok(Self {
            in_strelka: header.column(IN_STRELKA)?,
            dna       : TumorColumns::resolve(header, Assay::Dna)?,
            rna       : TumorColumns::resolve(header, Assay::Rna)?,
        })
    }

    fn passes(&self, thresholds: &ThresholdSet, row: &Row) -> Result<bool, RecordError> {
        if row.text_equals(&self.in_strelka, IN_STRELKA) {
            return Ok(true)
        }

        let dna_cov = row.reading(&self.dna.coverage)?;
        let rna_cov = row.reading(&self.rna.coverage)?;
        Ok(match Regime::select(dna_cov, rna_cov) {
            Regime::RnaOnly => self.assay_clears(thresholds, row, Assay::Rna, rna_cov)?,
            Regime::DnaOnly => self.assay_clears(thresholds, row, Assay::Dna, dna_cov)?,
            Regime::Both    => {
                self.assay_clears(thresholds, row, Assay::Dna, dna_cov)?
                    || self.assay_clears(thresholds, row, Assay::Rna, rna_cov)?
            },
        })
    }
}
