use std::{fs, path::Path, str::FromStr};

use ahash::AHashMap;
use anyhow::Result;

use located_error::LocatedError;

use super::{ThresholdError, ThresholdSource};

/// Name of the section whose values are visible from every other section.
const DEFAULT_SECTION: &str = "DEFAULT";

/// A parsed INI configuration file.
///
/// # Format
/// ```text
/// # comment
/// [quality_filters]
/// DNA_t_cov = 10
/// DNA_t_af: 0.1   ; inline comment
/// ```
/// - Section names are case-sensitive, keys are not.
/// - Keys and values may be separated by either `=` or `:`.
/// - Values of the `[DEFAULT]` section act as fallbacks for every other section.
/// - Values are taken verbatim: `%(key)s` references are not interpolated.
/// - Multi-line values are not supported. Any indented line is rejected, instead of being
///   read as the continuation of the previous value.
#[derive(Debug, Default)]
pub struct IniDocument {
    sections: AHashMap<String, AHashMap<String, String>>,
}

impl IniDocument {
    /// Read and parse an INI file.
    ///
    /// # Errors
    /// - `OpenFile` if `path` cannot be read.
    /// - `MalformedLine` or `MissingSectionHeader` if the file is not a valid INI document.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ThresholdError::OpenFile { path: path.to_path_buf(), source })
            .loc("While reading INI thresholds file")?;
        contents.parse::<Self>()
            .with_loc(|| format!("While parsing {}", path.display()))
    }
}

impl FromStr for IniDocument {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut document = Self::default();
        let mut current: Option<String> = None;

        for (i, raw) in s.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with(['#', ';']) {
                continue
            }
            if raw.starts_with(char::is_whitespace) {
                return Err(ThresholdError::IndentedLine { line: line_no, content: line.to_string() })
            }

            // ---- Section header.
            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']')
                    .ok_or_else(|| ThresholdError::MalformedLine { line: line_no, content: line.to_string() })?
                    .trim()
                    .to_string();
                document.sections.entry(name.clone()).or_default();
                current = Some(name);
                continue
            }

            // ---- Key-value pair.
            let Some(split) = line.find(['=', ':']) else {
                return Err(ThresholdError::MalformedLine { line: line_no, content: line.to_string() })
            };
            let section = current.as_ref().ok_or(ThresholdError::MissingSectionHeader { line: line_no })?;
            let key   = line[..split].trim().to_lowercase();
            let value = strip_inline_comment(line[split + 1..].trim());
            if key.is_empty() {
                return Err(ThresholdError::MalformedLine { line: line_no, content: line.to_string() })
            }
            document.sections.entry(section.clone()).or_default().insert(key, value.to_string());
        }
        Ok(document)
    }
}

/// Strip a trailing `;` comment, when it is preceded by whitespace.
fn strip_inline_comment(value: &str) -> &str {
    value.find(" ;")
        .or_else(|| value.find("\t;"))
        .map_or(value, |idx| value[..idx].trim_end())
}

impl ThresholdSource for IniDocument {
    fn value(&self, section: &str, key: &str) -> Option<String> {
        let key = key.to_lowercase();
        [section, DEFAULT_SECTION].into_iter()
            .find_map(|name| self.sections.get(name)?.get(&key))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "\
        # Default thresholds\n\
        [DEFAULT]\n\
        RNA_n_altC = 3\n\
        \n\
        [quality_filters]\n\
        DNA_t_cov = 10\n\
        DNA_t_af: 0.1 ; ten percent\n\
        \n\
        [somatic_filters]\n\
        RNA_n_altC = 5\n\
    ";

    #[test]
    fn parse_sections() -> Result<(), ThresholdError> {
        let document = DOCUMENT.parse::<IniDocument>()?;
        assert_eq!(document.value("quality_filters", "DNA_t_cov").as_deref(), Some("10"));
        assert_eq!(document.value("quality_filters", "DNA_t_af").as_deref(), Some("0.1"));
        assert_eq!(document.value("somatic_filters", "DNA_t_cov"), None);
        Ok(())
    }

    #[test]
    fn keys_are_case_insensitive() -> Result<(), ThresholdError> {
        let document = DOCUMENT.parse::<IniDocument>()?;
        assert_eq!(document.value("quality_filters", "dna_T_COV").as_deref(), Some("10"));
        assert_eq!(document.value("QUALITY_FILTERS", "DNA_t_cov"), None);
        Ok(())
    }

    #[test]
    fn default_section_fallback() -> Result<(), ThresholdError> {
        let document = DOCUMENT.parse::<IniDocument>()?;
        assert_eq!(document.value("somatic_filters", "RNA_n_altC").as_deref(), Some("5"));
        assert_eq!(document.value("quality_filters", "RNA_n_altC").as_deref(), Some("3"));
        Ok(())
    }

    #[test]
    fn missing_section_header() {
        let err = "DNA_t_cov = 10".parse::<IniDocument>().expect_err("No section header");
        assert!(matches!(err, ThresholdError::MissingSectionHeader { line: 1 }));
    }

    #[test]
    fn malformed_lines() {
        for (document, line) in [("[quality_filters\n", 1), ("[quality_filters]\nDNA_t_cov 10\n", 2), ("[a]\n= 3", 2)] {
            let err = document.parse::<IniDocument>().expect_err("Malformed document");
            assert!(matches!(err, ThresholdError::MalformedLine { line: l, .. } if l == line), "{err}");
        }
    }

    #[test]
    fn indented_lines_are_rejected() {
        let document = "[quality_filters]\nDNA_t_cov = 10\n    20\n";
        let err = document.parse::<IniDocument>().expect_err("Continuation lines are not supported");
        assert!(matches!(err, ThresholdError::IndentedLine { line: 3, .. }), "{err}");

        let document = "[quality_filters]\n\tDNA_t_cov = 10\n";
        let err = document.parse::<IniDocument>().expect_err("Indented keys are not supported");
        assert!(matches!(err, ThresholdError::IndentedLine { line: 2, .. }), "{err}");
    }

    #[test]
    fn indented_comments_are_skipped() -> Result<(), ThresholdError> {
        let document = "[quality_filters]\n  # coverage\nDNA_t_cov = %(base)s\n".parse::<IniDocument>()?;
        assert_eq!(document.value("quality_filters", "DNA_t_cov").as_deref(), Some("%(base)s"));
        Ok(())
    }
}
