use std::path::Path;

use anyhow::Result;
use log::{debug, info};
#[cfg(test)]
use mockall::automock;

use located_error::LocatedError;
use variant::Assay;

mod error;
pub use error::ThresholdError;

mod ini;
pub use ini::IniDocument;

mod yaml;
pub use yaml::YamlDocument;

/// Section holding tumor quality thresholds.
pub const QUALITY_SECTION: &str = "quality_filters";
/// Section holding matched-normal somatic thresholds.
pub const SOMATIC_SECTION: &str = "somatic_filters";

/// A key-value configuration supplier, organized in named sections.
#[cfg_attr(test, automock)]
pub trait ThresholdSource {
    /// Return the raw value of `key` within `section`, if any.
    fn value(&self, section: &str, key: &str) -> Option<String>;
}

/// Minimal tumor-sample requirements of a single assay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumorThresholds {
    pub coverage            : f64,
    pub alt_count           : f64,
    pub allele_fraction     : f64,
    /// Minimal `(RefC + AltC) / coverage` ratio. Guards against misalignments at exon junctions.
    pub altref_total_percent: f64,
}

/// Maximal matched-normal signal of a single assay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalThresholds {
    pub allele_fraction: f64,
    pub alt_count      : f64,
}

/// The complete, immutable set of quality and somatic thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSet {
    pub dna_tumor : TumorThresholds,
    pub rna_tumor : TumorThresholds,
    pub dna_normal: NormalThresholds,
    pub rna_normal: NormalThresholds,
}

impl ThresholdSet {
    /// Load thresholds from a configuration file.
    ///
    /// # Behavior
    /// - `.yaml` and `.yml` files are deserialized as yaml documents.
    /// - Any other file is parsed as an INI document.
    ///
    /// # Errors
    /// - If the file cannot be opened or parsed.
    /// - `MissingKey` or `InvalidValue` if any of the twelve thresholds is missing, or is not a number.
    pub fn load(path: &Path) -> Result<Self> {
        let loc_msg = || format!("While loading thresholds from {}", path.display());
        let is_yaml = path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml"));

        let thresholds = match is_yaml {
            true  => Self::from_source(&YamlDocument::from_path(path)?),
            false => Self::from_source(&IniDocument::from_path(path)?),
        }.with_loc(loc_msg)?;

        info!("Loaded quality and somatic thresholds from {}", path.display());
        debug!("{thresholds:#?}");
        Ok(thresholds)
    }

    /// Fetch and parse all twelve thresholds from a configuration supplier.
    ///
    /// # Errors
    /// - `MissingKey` if any threshold is absent.
    /// - `InvalidValue` if any threshold cannot be parsed as a float.
    pub fn from_source(source: &impl ThresholdSource) -> Result<Self, ThresholdError> {
        Ok(Self {
            dna_tumor : TumorThresholds::from_source(source, Assay::Dna)?,
            rna_tumor : TumorThresholds::from_source(source, Assay::Rna)?,
            dna_normal: NormalThresholds::from_source(source, Assay::Dna)?,
            rna_normal: NormalThresholds::from_source(source, Assay::Rna)?,
        })
    }

    #[must_use]
    pub fn tumor(&self, assay: Assay) -> &TumorThresholds {
        match assay {
            Assay::Dna => &self.dna_tumor,
            Assay::Rna => &self.rna_tumor,
        }
    }

    #[must_use]
    pub fn normal(&self, assay: Assay) -> &NormalThresholds {
        match assay {
            Assay::Dna => &self.dna_normal,
            Assay::Rna => &self.rna_normal,
        }
    }
}

impl TumorThresholds {
    fn from_source(source: &impl ThresholdSource, assay: Assay) -> Result<Self, ThresholdError> {
        let get = |name: &str| fetch(source, QUALITY_SECTION, &format!("{assay}_t_{name}"));
        Ok(Self {
            coverage            : get("cov")?,
            alt_count           : get("altC")?,
            allele_fraction     : get("af")?,
            altref_total_percent: get("altref_total_percent")?,
        })
    }
}

impl NormalThresholds {
    fn from_source(source: &impl ThresholdSource, assay: Assay) -> Result<Self, ThresholdError> {
        let get = |name: &str| fetch(source, SOMATIC_SECTION, &format!("{assay}_n_{name}"));
        Ok(Self {
            allele_fraction: get("af")?,
            alt_count      : get("altC")?,
        })
    }
}

fn fetch(source: &impl ThresholdSource, section: &str, key: &str) -> Result<f64, ThresholdError> {
    let raw = source.value(section, key).ok_or_else(|| ThresholdError::MissingKey {
        section: section.to_string(),
        key    : key.to_string(),
    })?;

    raw.trim().parse::<f64>().map_err(|_| ThresholdError::InvalidValue {
        section: section.to_string(),
        key    : key.to_string(),
        value  : raw.clone(),
    })
}
