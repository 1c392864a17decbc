//! Core secret scanning engine for snoop.
//!
//! This crate provides deterministic, pattern-based detection of hardcoded
//! secrets in file trees. It has no console dependency and is designed to be
//! embedded: the CLI crate (`snoop_cli`) is a thin consumer that renders the
//! findings this crate produces.
//!
//! # Main Types
//!
//! - [`Scanner`] - Runs a rule set against lines, files, and directory trees
//! - [`RuleSet`] - Immutable collection of rules with keyword pre-filtering
//! - [`Finding`] - A detected secret with location and the raw matched value
//! - [`mask`] - Display-safe masking applied by reporting layers at render time
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for structured, typed errors:
//!
//! - [`RuleError`] - Rule compilation failures
//! - [`SkipReason`] - Why a single file was skipped instead of scanned
//!
//! Scanning itself never fails: an unreadable file yields a [`FileScan`]
//! carrying a skip reason, and the rest of the tree is still scanned.

/// Error types for rule compilation and per-file skip classification.
pub mod error;
/// Fixed ignore sets deciding which filesystem entries are never scanned.
pub mod filter;
/// The finding record produced for every rule match.
pub mod finding;
/// Display masking for secret values.
pub mod mask;
/// Detection rules and the keyword-indexed rule set.
pub mod rule;
/// The scanning engine: line, file, and directory scanning.
pub mod scanner;
#[cfg(test)]
pub(crate) mod test_utils;
/// Directory traversal with ignore-list pruning.
pub mod walk;

pub use error::{RuleError, SkipReason};
pub use finding::Finding;
pub use mask::mask;
pub use rule::{Rule, RuleSet, Severity};
pub use scanner::{FileScan, Scanner};
pub use walk::collect_files;
