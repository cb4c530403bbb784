use std::fmt::{self, Display, Formatter};

/// Identity of a variant across patients.
///
/// Fields are kept verbatim, so that two rows describing the same variant always hash to the
/// same key, whatever their numeric formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    pub gene      : String,
    pub chromosome: String,
    pub position  : String,
    pub ref_base  : String,
    pub alt_base  : String,
}

impl VariantKey {
    #[must_use]
    pub fn new(gene: &str, chromosome: &str, position: &str, ref_base: &str, alt_base: &str) -> Self {
        Self {
            gene      : gene.to_string(),
            chromosome: chromosome.to_string(),
            position  : position.to_string(),
            ref_base  : ref_base.to_string(),
            alt_base  : alt_base.to_string(),
        }
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{} {}>{}", self.gene, self.chromosome, self.position, self.ref_base, self.alt_base)
    }
}

/// Patient identifier, shared by every sample (tumor, normal, ...) of a single patient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(String);

impl PatientId {
    /// Extract the patient identifier of a sample name: the token before its first underscore.
    /// e.g. `"P042_T1_DNA"` -> `"P042"`. Sample names without underscores are used as is.
    #[must_use]
    pub fn from_sample(sample: &str) -> Self {
        let patient = sample.split_once('_').map_or(sample, |(patient, _)| patient);
        Self(patient.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PatientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
