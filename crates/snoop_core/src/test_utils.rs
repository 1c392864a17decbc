//! Shared helpers for unit tests in this crate.

#![allow(clippy::unwrap_used, reason = "test helpers")]

use std::path::Path;
use std::sync::Arc;

use regex::Regex;

use crate::finding::Finding;
use crate::rule::{Rule, Severity};

/// Builds a rule from a pattern known to be valid at the call site.
pub(crate) fn make_rule(
    label: &'static str,
    severity: Severity,
    pattern: &str,
    keywords: &'static [&'static str],
) -> Rule {
    Rule {
        label,
        severity,
        regex: Regex::new(pattern).unwrap(),
        keywords,
    }
}

/// Builds a finding with placeholder snippet and line content.
pub(crate) fn make_finding(
    path: &str,
    line: u32,
    secret_type: &str,
    severity: Severity,
) -> Finding {
    Finding {
        path: Box::from(Path::new(path)),
        line,
        secret_type: Arc::from(secret_type),
        severity,
        snippet: Box::from("snippet"),
        line_content: Box::from("line content"),
    }
}
