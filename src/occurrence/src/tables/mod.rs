use std::path::Path;

use ahash::{AHashMap, AHashSet};
use anyhow::Result;
use log::{debug, info};

use located_error::LocatedError;
use variant::{Column, Header, PatientId, RecordError, VariantKey};
use variant_io::read::TableReader;

use crate::OccurrenceError;

/// Columns identifying a variant and the patient it was called in.
#[derive(Debug, Clone)]
pub struct KeyColumns {
    gene      : Column,
    chromosome: Column,
    position  : Column,
    ref_base  : Column,
    alt_base  : Column,
    patient   : Column,
}

impl KeyColumns {
    /// Resolve key columns by name, wherever they are located within the header.
    ///
    /// # Errors
    /// - `MissingColumn` if any of `gene`, `chromosome`, `position`, `ref_base`, `alt_base`
    ///   or `patient_ID` is missing.
    pub fn resolve(header: &Header) -> Result<Self, RecordError> {
        Ok(Self {
            gene      : header.column("gene")?,
            chromosome: header.column("chromosome")?,
            position  : header.column("position")?,
            ref_base  : header.column("ref_base")?,
            alt_base  : header.column("alt_base")?,
            patient   : header.column("patient_ID")?,
        })
    }

    /// Build the variant key of a split record. `fields` must match the resolved header.
    #[must_use]
    pub fn variant_key(&self, fields: &[&str]) -> VariantKey {
        VariantKey::new(
            fields[self.gene.index],
            fields[self.chromosome.index],
            fields[self.position.index],
            fields[self.ref_base.index],
            fields[self.alt_base.index],
        )
    }

    #[must_use]
    pub fn patient(&self, fields: &[&str]) -> PatientId {
        PatientId::from_sample(fields[self.patient.index])
    }
}

/// Occurrence counts of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceCounts {
    /// Number of distinct patients carrying any variant of the record's gene.
    pub gene_patients: usize,
    /// Number of distinct variants of the record's gene.
    pub gene_snvs    : usize,
    /// Number of distinct patients carrying this exact variant.
    pub snv_patients : usize,
}

/// Distinct-set accumulator, collapsed into [`OccurrenceTables`] once every record was seen.
#[derive(Debug, Default)]
struct OccurrenceSets {
    gene_patients: AHashMap<String, AHashSet<PatientId>>,
    gene_snvs    : AHashMap<String, AHashSet<VariantKey>>,
    snv_patients : AHashMap<VariantKey, AHashSet<PatientId>>,
}

impl OccurrenceSets {
    fn insert(&mut self, key: VariantKey, patient: PatientId) {
        self.gene_patients.entry(key.gene.clone()).or_default().insert(patient.clone());
        self.gene_snvs.entry(key.gene.clone()).or_default().insert(key.clone());
        self.snv_patients.entry(key).or_default().insert(patient);
    }

    fn collapse(self) -> OccurrenceTables {
        fn cardinalities<K: std::hash::Hash + Eq, V>(sets: AHashMap<K, AHashSet<V>>) -> AHashMap<K, usize> {
            sets.into_iter().map(|(k, set)| (k, set.len())).collect()
        }
        OccurrenceTables {
            gene_patients: cardinalities(self.gene_patients),
            gene_snvs    : cardinalities(self.gene_snvs),
            snv_patients : cardinalities(self.snv_patients),
        }
    }
}

/// Gene-level and variant-level distinct-patient counts of a single table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OccurrenceTables {
    gene_patients: AHashMap<String, usize>,
    gene_snvs    : AHashMap<String, usize>,
    snv_patients : AHashMap<VariantKey, usize>,
}

impl OccurrenceTables {
    /// Count occurrences over every record of a table.
    ///
    /// # Errors
    /// - If `path` cannot be read.
    /// - `MissingColumn` if any key column is missing from the header.
    /// - `FieldCount` if a record does not match the header.
    pub fn scan(path: &Path) -> Result<Self> {
        let mut reader = TableReader::open(path)?;
        let header     = reader.header().clone();
        let columns    = KeyColumns::resolve(&header)
            .with_loc(|| format!("While resolving variant key columns of {}", path.display()))?;

        let mut sets = OccurrenceSets::default();
        for record in reader.records() {
            let (line_no, line) = record?;
            let fields = header.split(line_no, &line)
                .with_loc(|| format!("While scanning occurrences of {}", path.display()))?;
            sets.insert(columns.variant_key(&fields), columns.patient(&fields));
        }

        let tables = sets.collapse();
        info!("Found {} distinct variants across {} genes in {}", tables.variants(), tables.genes(), path.display());
        Ok(tables)
    }

    /// Count occurrences over an in-memory set of `(variant, patient)` observations.
    pub fn from_observations(observations: impl IntoIterator<Item = (VariantKey, PatientId)>) -> Self {
        let mut sets = OccurrenceSets::default();
        for (key, patient) in observations {
            sets.insert(key, patient);
        }
        sets.collapse()
    }

    /// Fetch the occurrence counts of a variant.
    ///
    /// # Errors
    /// - `MissingGene` or `MissingVariant` if `key` was never observed.
    pub fn counts(&self, key: &VariantKey) -> Result<OccurrenceCounts, OccurrenceError> {
        let missing_gene = || OccurrenceError::MissingGene(key.gene.clone());
        let counts = OccurrenceCounts {
            gene_patients: *self.gene_patients.get(&key.gene).ok_or_else(missing_gene)?,
            gene_snvs    : *self.gene_snvs.get(&key.gene).ok_or_else(missing_gene)?,
            snv_patients : *self.snv_patients.get(key).ok_or_else(|| OccurrenceError::MissingVariant(key.clone()))?,
        };
        debug!("{key}: {counts:?}");
        Ok(counts)
    }

    #[must_use]
    pub fn genes(&self) -> usize {
        self.gene_patients.len()
    }

    #[must_use]
    pub fn variants(&self) -> usize {
        self.snv_patients.len()
    }
}
