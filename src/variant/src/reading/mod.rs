use std::{fmt::{self, Display, Formatter}, ops::Add};

/// Sentinel value marking a modality which was not sequenced for a given sample.
pub const NOT_SEQUENCED: &str = "na";

/// A sequencing measurement (coverage, allele count, allele fraction), which may be missing
/// when the corresponding assay was not performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Measured(f64),
    NotSequenced,
}

impl Reading {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Measured(value) => Some(value),
            Self::NotSequenced    => None,
        }
    }

    #[must_use]
    pub fn is_sequenced(self) -> bool {
        matches!(self, Self::Measured(_))
    }

    /// `self >= threshold`. A missing measurement never clears a threshold.
    #[must_use]
    pub fn at_least(self, threshold: f64) -> bool {
        self.value().is_some_and(|value| value >= threshold)
    }

    /// `self <= threshold`. A missing measurement never clears a threshold.
    #[must_use]
    pub fn at_most(self, threshold: f64) -> bool {
        self.value().is_some_and(|value| value <= threshold)
    }
}

impl Add for Reading {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Measured(a), Self::Measured(b)) => Self::Measured(a + b),
            _                                      => Self::NotSequenced,
        }
    }
}

impl Display for Reading {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measured(value) => write!(f, "{value}"),
            Self::NotSequenced    => f.write_str(NOT_SEQUENCED),
        }
    }
}

/// Nucleic-acid assay of a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assay {
    Dna,
    Rna,
}

impl Display for Assay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dna => f.write_str("DNA"),
            Self::Rna => f.write_str("RNA"),
        }
    }
}

/// Which assays were performed on the tumor sample of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Only the transcriptome was sequenced.
    RnaOnly,
    /// Only the genome was sequenced.
    DnaOnly,
    /// Both genome and transcriptome were sequenced.
    Both,
}

impl Regime {
    /// Select the coverage regime of a record, from its tumor DNA and RNA coverages.
    ///
    /// DNA is checked first: a record where neither assay was sequenced is treated as `RnaOnly`.
    #[must_use]
    pub fn select(dna_coverage: Reading, rna_coverage: Reading) -> Self {
        match (dna_coverage.is_sequenced(), rna_coverage.is_sequenced()) {
            (false, _)    => Self::RnaOnly,
            (true, false) => Self::DnaOnly,
            (true, true)  => Self::Both,
        }
    }
}

impl Display for Regime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::RnaOnly => f.write_str("RNA-only"),
            Self::DnaOnly => f.write_str("DNA-only"),
            Self::Both    => f.write_str("DNA+RNA"),
        }
    }
}
