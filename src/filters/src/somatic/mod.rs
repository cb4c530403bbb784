use log::trace;

use variant::{Assay, Column, Header, RecordError, Regime, Row};

use crate::{filtering::{VariantFilter, IN_STRELKA}, ThresholdSet};

/// Matched-normal columns of a single assay: `n_{DNA|RNA}_{AF|AltC}`
#[derive(Debug, Clone)]
struct NormalColumns {
    allele_fraction: Column,
    alt_count      : Column,
}

impl NormalColumns {
    fn resolve(header: &Header, assay: Assay) -> Result<Self, RecordError> {
        Ok(Self {
            allele_fraction: header.column(&format!("n_{assay}_AF"))?,
            alt_count      : header.column(&format!("n_{assay}_AltC"))?,
        })
    }
}

/// Keep variants whose matched normal sample carries little to no alternate-allele signal.
///
/// Only meaningful for paired samples, and expected to run on records which already went
/// through the [`QualityFilter`](crate::QualityFilter).
#[derive(Debug, Clone)]
pub struct SomaticFilter {
    in_strelka: Column,
    dna_cov   : Column,
    rna_cov   : Column,
    dna       : NormalColumns,
    rna       : NormalColumns,
}

impl SomaticFilter {
    /// A normal sample shows low signal if either its allele fraction or its alt-count stays
    /// under the thresholds of `assay`.
    fn low_signal(&self, thresholds: &ThresholdSet, row: &Row, assay: Assay) -> Result<bool, RecordError> {
        let (columns, thresholds) = match assay {
            Assay::Dna => (&self.dna, thresholds.normal(Assay::Dna)),
            Assay::Rna => (&self.rna, thresholds.normal(Assay::Rna)),
        };
        let allele_fraction = row.reading(&columns.allele_fraction)?;
        let alt_count       = row.reading(&columns.alt_count)?;
        let low = allele_fraction.at_most(thresholds.allele_fraction) || alt_count.at_most(thresholds.alt_count);
        trace!("{assay} normal readings AF={allele_fraction}, AltC={alt_count} -> low signal: {low}");
        Ok(low)
    }
}

impl VariantFilter for SomaticFilter {
    const NAME: &'static str = "somatic";

    fn from_header(header: &Header) -> Result<Self, RecordError> {
        Ok(Self {
            in_strelka: header.column(IN_STRELKA)?,
            dna_cov   : header.column("t_DNA_cov")?,
            rna_cov   : header.column("t_RNA_cov")?,
            dna       : NormalColumns::resolve(header, Assay::Dna)?,
            rna       : NormalColumns::resolve(header, Assay::Rna)?,
        })
    }

    fn passes(&self, thresholds: &ThresholdSet, row: &Row) -> Result<bool, RecordError> {
        if row.text_equals(&self.in_strelka, IN_STRELKA) {
            return Ok(true)
        }

        let regime = Regime::select(row.reading(&self.dna_cov)?, row.reading(&self.rna_cov)?);
        Ok(match regime {
            Regime::RnaOnly => self.low_signal(thresholds, row, Assay::Rna)?,
            Regime::DnaOnly => self.low_signal(thresholds, row, Assay::Dna)?,
            Regime::Both    => {
                self.low_signal(thresholds, row, Assay::Rna)?
                    && self.low_signal(thresholds, row, Assay::Dna)?
            },
        })
    }
}
