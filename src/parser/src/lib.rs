use std::{
    ffi::OsStr,
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};

use located_error::LocatedError;

use anyhow::Result;
use clap::{ArgEnum, Parser};
use log::debug;
use serde::{Deserialize, Serialize};

mod error;
pub use error::ParserError;

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name="somafilt", author, version, about, long_about = None)]
/// somafilt: Filter somatic variant calls against quality and somatic thresholds, then recompute
/// patient occurrences.
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences))]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long)]
    pub quiet: bool,

    /// Tab-separated variant summary table.
    ///
    /// Outputs are written alongside this file, using its name stripped from its last extension
    /// as a prefix: '<prefix>.filtered.tmp', '<prefix>.filtered.txt' and, for paired samples,
    /// '<prefix>.filtered.somatic.txt'
    #[clap(short='i', long, alias("input_file"), parse(try_from_os_str=valid_input_file))]
    pub input_file: PathBuf,

    /// Quality and somatic thresholds configuration file.
    ///
    /// Must define sections [quality_filters] and [somatic_filters]. '.yaml' and '.yml' files are read as
    /// yaml documents. Any other file is read as an INI document.
    #[clap(short='f', long="quality-somatic-filters", alias("quality_somatic_filters"), parse(try_from_os_str=valid_input_file))]
    pub filters: PathBuf,

    /// Whether the tumor sample was sequenced along with a matched normal sample.
    ///
    /// Somatic filtering against the matched normal is only applied on 'paired' samples.
    #[clap(short='p', long, arg_enum)]
    pub pairing: Pairing,
}

impl Cli {
    /// Global logging verbosity: 0 when `--quiet`, `--verbose` occurrences + 1 otherwise.
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        if self.quiet {0} else {self.verbose.saturating_add(1)}
    }

    /// Serialize command line arguments as yaml, and print them at the debug level.
    ///
    /// # Errors
    /// Sends an unrecoverable error if `serde_yaml` fails to parse `Self` to a string.
    pub fn serialize(&self) -> Result<String> {
        let serialized = serde_yaml::to_string(&self)
            .map_err(ParserError::Serialize)
            .loc("While serializing command line arguments")?;
        debug!("\n---- Command line args ----\n{}\n---", serialized);
        Ok(serialized)
    }
}

/// Sequencing design of the tumor sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ArgEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pairing {
    /// Tumor sample sequenced along with a matched normal sample.
    Paired,
    /// Tumor-only sequencing.
    Unpaired,
}

impl Display for Pairing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paired   => write!(f, "paired"),
            Self::Unpaired => write!(f, "unpaired"),
        }
    }
}

fn valid_input_file(s: &OsStr) -> Result<PathBuf> {
    let path = Path::new(s);
    if ! path.exists() {
        return Err(ParserError::MissingFile(path.display().to_string()))
            .loc("While checking for file validity")
    }
    if ! path.is_file() {
        return Err(ParserError::NotAFile(path.display().to_string()))
            .loc("While checking for file validity")
    }
    Ok(PathBuf::from(s))
}
