//! The finding record produced for every rule match.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::rule::Severity;

/// A single detected secret.
///
/// The snippet holds the raw matched text. Masking is a display concern and
/// is applied by reporting layers via [`crate::mask`] at render time, never
/// at detection time.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Path of the file containing the match.
    pub path: Box<Path>,
    /// 1-based line number of the match within the file.
    pub line: u32,
    /// Human-readable label of the rule that matched.
    pub secret_type: Arc<str>,
    /// Severity of the rule that matched.
    pub severity: Severity,
    /// The raw matched secret value. Capture group 1 when the rule defines
    /// one and it participated in the match, otherwise the full match.
    pub snippet: Box<str>,
    /// The full line the match occurred on, trimmed of the trailing newline.
    pub line_content: Box<str>,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at {}:{}",
            self.severity,
            self.secret_type,
            self.path.display(),
            self.line
        )
    }
}
