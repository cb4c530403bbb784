use std::{fmt::Display, panic::Location};

use anyhow::{Context, Result};

/// Format the source location of a caller as `[file:line:column]`
fn locate(caller: &Location) -> String {
    format!("[{}:{}:{}]", caller.file(), caller.line(), caller.column())
}

/// Attach a context message, prefixed with the location of the caller, to a fallible value.
///
/// Every context frame of an error chain thus points back to the line of code which
/// added it. e.g.:
/// ```text
/// [src/filters/src/thresholds.rs:88:14] While loading thresholds from 'filters.ini'
/// ```
pub trait LocatedError<T, E> {
    /// Wrap the error value with additional context + the location at which it was called.
    fn loc<C>(self, context: C) -> Result<T, anyhow::Error>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error value with additional context that is evaluated lazily
    /// only once an error does occur + the location at which it was called.
    fn with_loc<C, F>(self, f: F) -> Result<T, anyhow::Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> LocatedError<T, E> for Result<T, E>
where
    E: Display + Send + Sync + 'static,
    Result<T, E>: Context<T, E>,
{
    #[track_caller]
    fn loc<C>(self, context: C) -> Result<T, anyhow::Error>
    where
        C: Display + Send + Sync + 'static
    {
        let caller = Location::caller();
        self.with_context(|| format!("{} {context}", locate(caller)))
    }

    #[track_caller]
    fn with_loc<C, F>(self, f: F) -> Result<T, anyhow::Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C
    {
        let caller = Location::caller();
        self.with_context(|| format!("{} {}", locate(caller), f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Error, Debug)]
    enum ThresholdError {
        #[error("Invalid threshold value '{0}'")]
        Invalid(String),
    }

    fn parse_threshold(raw: &str) -> Result<f64, ThresholdError> {
        raw.parse::<f64>().map_err(|_| ThresholdError::Invalid(raw.to_string()))
    }

    fn load(raw: &str) -> Result<f64> {
        parse_threshold(raw).loc("While parsing DNA_t_cov")
    }

    fn load_section(raw: &str) -> Result<f64> {
        load(raw).with_loc(|| "While reading section [quality_filters]")
    }

    #[test]
    fn context_frames_carry_location() {
        let err = load_section("ten").expect_err("'ten' is not a float");
        let frames: Vec<String> = err.chain().map(ToString::to_string).collect();
        assert_eq!(frames.len(), 3);
        assert!(frames[0].starts_with(&format!("[{}:", file!())));
        assert!(frames[0].ends_with("While reading section [quality_filters]"));
        assert!(frames[1].ends_with("While parsing DNA_t_cov"));
        assert_eq!(frames[2], "Invalid threshold value 'ten'");
    }

    #[test]
    fn ok_values_pass_through() -> Result<()> {
        assert_eq!(load_section("10.5")?, 10.5);
        Ok(())
    }
}
