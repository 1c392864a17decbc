use std::io;

use thiserror::Error;

/// Errors that can occur when compiling a secret detection rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule's regular expression failed to compile.
    #[error("invalid regex in rule '{label}': {source}")]
    InvalidRegex {
        /// Label of the rule that failed (e.g. `"AWS Access Key ID"`).
        label: &'static str,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

/// Why a single file was skipped instead of (fully) scanned.
///
/// A skip is not an error to the caller: the scanner reports it alongside
/// whatever findings were accumulated before the failure, and the scan of
/// the rest of the tree continues.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// The file could not be opened or read due to missing permissions.
    #[error("permission denied")]
    PermissionDenied,

    /// The file could not be read for any other I/O reason.
    #[error("read failed: {0}")]
    Io(io::Error),
}

impl SkipReason {
    /// Classifies an I/O error into a skip reason.
    #[must_use]
    pub fn from_io(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied
        } else {
            Self::Io(err)
        }
    }
}
