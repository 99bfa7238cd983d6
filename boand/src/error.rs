//! Module containing all error types

use thiserror::Error;

/// Main error type for the policy search engine.
#[derive(Debug, Error)]
pub enum Error {
    /// An unrecognized value was given for a CLI-selectable option.
    #[error("unknown value {value:?} for option {option}, expected one of {allowed:?}")]
    Configuration {
        /// The option flag, e.g. `"-m"`.
        option: &'static str,
        /// The value the caller supplied.
        value: String,
        /// The set of values that would have been accepted.
        allowed: &'static [&'static str],
    },
    /// No [`Determinize`](crate::task::Determinize) implementation is linked in, so a PDDL
    /// domain/problem pair cannot be turned into a grounded [`Task`](crate::task::Task).
    #[error("no parser/determinizer is linked in")]
    NoDeterminizer,
    /// Writing a solution or stats file failed.
    #[error("I/O error writing {path}: {source}")]
    Io {
        /// The file that could not be written.
        path: std::path::PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
