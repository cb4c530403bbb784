use std::{collections::BTreeMap, fs::File, path::Path};

use anyhow::Result;
use serde_yaml::Value;

use located_error::LocatedError;

use super::{ThresholdError, ThresholdSource};

/// A yaml configuration file, made of top-level sections of scalar key-value pairs.
/// ```yaml
/// quality_filters:
///   DNA_t_cov: 10
///   DNA_t_af: 0.1
/// somatic_filters:
///   DNA_n_af: 0.05
/// ```
#[derive(Debug, Default)]
pub struct YamlDocument {
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl YamlDocument {
    /// Deserialize a yaml configuration file.
    ///
    /// # Errors
    /// - `OpenFile` if `path` cannot be opened.
    /// - `ParseYaml` if the file is not a mapping of mappings.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|source| ThresholdError::OpenFile { path: path.to_path_buf(), source })
            .loc("While reading yaml thresholds file")?;
        let sections = serde_yaml::from_reader(file)
            .map_err(ThresholdError::ParseYaml)
            .with_loc(|| format!("While parsing {}", path.display()))?;
        Ok(Self { sections })
    }

    /// Parse an in-memory yaml document.
    ///
    /// # Errors
    /// - `ParseYaml` if `s` is not a mapping of mappings.
    pub fn from_yaml_str(s: &str) -> Result<Self, ThresholdError> {
        Ok(Self { sections: serde_yaml::from_str(s)? })
    }
}

impl ThresholdSource for YamlDocument {
    fn value(&self, section: &str, key: &str) -> Option<String> {
        let section = self.sections.get(section)?;
        let value = section.get(key).or_else(|| {
            section.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })?;

        match value {
            Value::Null      => None,
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            other            => Some(format!("{other:?}")),
        }
    }
}
