//! Detection rules and the keyword-indexed rule set.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Error returned when parsing an invalid severity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError {
    invalid_value: Box<str>,
}

impl ParseSeverityError {
    fn new(value: &str) -> Self {
        Self {
            invalid_value: value.into(),
        }
    }

    /// Returns the invalid value that caused the parse failure.
    #[must_use]
    pub fn invalid_value(&self) -> &str {
        &self.invalid_value
    }
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid severity '{}': expected one of 'low', 'medium', 'high'",
            self.invalid_value
        )
    }
}

impl std::error::Error for ParseSeverityError {}

/// How severe a detected secret exposure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low risk - weakly identified generic assignments that need review.
    Low,
    /// Medium risk - service tokens that grant scoped access.
    Medium,
    /// High risk - credentials that grant broad access to infrastructure.
    High,
}

impl Severity {
    /// All severity levels in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseSeverityError::new(s)),
        }
    }
}

/// A single builtin rule definition, compiled into a [`Rule`] at startup.
#[derive(Debug, Clone)]
struct RuleDef {
    /// Human-readable secret type label (e.g. `"AWS Access Key ID"`).
    label: &'static str,
    /// How severe an exposure of this secret type is.
    severity: Severity,
    /// The regular expression used to match this secret within one line.
    regex: &'static str,
    /// Case-insensitive keywords for Aho-Corasick pre-filtering.
    keywords: &'static [&'static str],
}

/// The builtin rule table, ordered high to low severity.
///
/// Order determines scan sequence per line but never which matches are
/// found: every rule is evaluated independently and all matches are kept.
/// Alternations that name the key or scheme rather than the secret value
/// are non-capturing, so group 1 is always the secret value proper.
const BUILTIN_RULES: &[RuleDef] = &[
    // High risk
    RuleDef {
        label: "AWS Access Key ID",
        severity: Severity::High,
        regex: r"AKIA[0-9A-Z]{16}",
        keywords: &["AKIA"],
    },
    RuleDef {
        label: "AWS Secret Access Key",
        severity: Severity::High,
        regex: r#"(?i)aws_secret_access_key\s*[=:]\s*["']?([A-Za-z0-9/+=]{40})["']?"#,
        keywords: &["aws_secret_access_key"],
    },
    RuleDef {
        label: "Private Key",
        severity: Severity::High,
        regex: r"-----BEGIN\s+(?:RSA|DSA|EC|OPENSSH)\s+PRIVATE KEY-----",
        keywords: &["PRIVATE KEY"],
    },
    RuleDef {
        label: "Database URL with Password",
        severity: Severity::High,
        regex: r"(?i)(?:postgres|mysql|mongodb)://[^:\s]+:[^@\s]+@\S+",
        keywords: &["postgres://", "mysql://", "mongodb://"],
    },
    // Medium risk
    RuleDef {
        label: "API Token",
        severity: Severity::Medium,
        regex: r#"(?i)(?:api[_-]?key|access[_-]?token|bearer)\s*[=:]\s*["']?([A-Za-z0-9_\-]{20,})["']?"#,
        keywords: &["api", "token", "bearer"],
    },
    RuleDef {
        label: "GitHub Personal Access Token",
        severity: Severity::Medium,
        regex: r"ghp_[A-Za-z0-9]{36}",
        keywords: &["ghp_"],
    },
    RuleDef {
        label: "Slack Webhook URL",
        severity: Severity::Medium,
        regex: r"https://hooks\.slack\.com/services/[A-Z0-9]+/[A-Z0-9]+/[A-Za-z0-9]+",
        keywords: &["hooks.slack.com"],
    },
    RuleDef {
        label: "Stripe Live Key",
        severity: Severity::Medium,
        regex: r"sk_live_[A-Za-z0-9]{24,}",
        keywords: &["sk_live_"],
    },
    RuleDef {
        label: "Slack Token",
        severity: Severity::Medium,
        regex: r"xox[baprs]-[0-9a-zA-Z-]{10,}",
        keywords: &["xox"],
    },
    // Low risk
    RuleDef {
        label: "Password Variable",
        severity: Severity::Low,
        regex: r#"(?i)password\s*[=:]\s*["']([^"']+)["']"#,
        keywords: &["password"],
    },
    RuleDef {
        label: "Secret Variable",
        severity: Severity::Low,
        regex: r#"(?i)secret\s*[=:]\s*["']([^"']+)["']"#,
        keywords: &["secret"],
    },
    RuleDef {
        label: "API Key Variable",
        severity: Severity::Low,
        regex: r#"(?i)apikey\s*[=:]\s*["']([^"']+)["']"#,
        keywords: &["apikey"],
    },
];

/// A compiled secret detection rule ready for scanning.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Human-readable secret type label carried into every finding.
    pub label: &'static str,
    /// Severity assigned to findings from this rule.
    pub severity: Severity,
    /// Compiled regular expression that matches the secret within one line.
    pub regex: Regex,
    /// Case-insensitive keywords for Aho-Corasick pre-filtering. If non-empty,
    /// the rule is only tested against lines that contain at least one keyword.
    pub keywords: &'static [&'static str],
}

impl Rule {
    fn from_def(def: &RuleDef) -> Result<Self, RuleError> {
        let regex = Regex::new(def.regex).map_err(|source| RuleError::InvalidRegex {
            label: def.label,
            source,
        })?;

        Ok(Self {
            label: def.label,
            severity: def.severity,
            regex,
            keywords: def.keywords,
        })
    }
}

/// Immutable, ordered collection of [`Rule`]s with Aho-Corasick pre-filtering.
///
/// The rule set is constructed once and passed explicitly into the
/// [`crate::Scanner`]; it is never ambient global state, so the engine can be
/// tested with a substitute rule set. A keyword automaton is built at
/// construction time so the scanner can cheaply decide which rules to run
/// against a given line.
pub struct RuleSet {
    rules: Vec<Rule>,
    keyword_automaton: Option<AhoCorasick>,
    keyword_to_rules: Vec<Vec<usize>>,
    rules_without_keywords: Vec<usize>,
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.len())
            .field("rules_without_keywords", &self.rules_without_keywords.len())
            .finish_non_exhaustive()
    }
}

impl RuleSet {
    /// Compiles the builtin rule table into a rule set.
    pub fn builtin() -> Result<Self, RuleError> {
        let rules = BUILTIN_RULES
            .iter()
            .map(Rule::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// Creates a rule set from a list of rules, building the keyword index.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        let keyword_index = build_keyword_index(&rules);
        let keyword_automaton = build_automaton(&keyword_index.keywords);

        Self {
            rules,
            keyword_automaton,
            keyword_to_rules: keyword_index.keyword_to_rules,
            rules_without_keywords: keyword_index.rules_without_keywords,
        }
    }

    /// Returns all rules as a slice, in scan order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up a rule by its positional index in the set.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Rule> {
        self.rules.get(idx)
    }

    /// Returns the total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set contains no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns indices of every rule whose keywords appear in `line`, plus
    /// all rules that have no keywords, in rule order.
    ///
    /// This is the pre-filter step: rules whose keywords are absent cannot
    /// match and are never handed to the regex engine.
    #[must_use]
    pub(crate) fn candidate_rules(&self, line: &str) -> Vec<usize> {
        let mut should_run = vec![false; self.rules.len()];

        for &idx in &self.rules_without_keywords {
            should_run[idx] = true;
        }

        if let Some(automaton) = &self.keyword_automaton {
            for mat in automaton.find_iter(line) {
                let keyword_idx = mat.pattern().as_usize();
                for &rule_idx in &self.keyword_to_rules[keyword_idx] {
                    should_run[rule_idx] = true;
                }
            }
        }

        should_run
            .iter()
            .enumerate()
            .filter_map(|(idx, &run)| run.then_some(idx))
            .collect()
    }
}

struct KeywordIndex {
    keywords: Vec<String>,
    keyword_to_rules: Vec<Vec<usize>>,
    rules_without_keywords: Vec<usize>,
}

fn build_keyword_index(rules: &[Rule]) -> KeywordIndex {
    let mut keywords = Vec::new();
    let mut keyword_to_rules: Vec<Vec<usize>> = Vec::new();
    let mut rules_without_keywords = Vec::new();
    let mut keyword_positions: HashMap<&'static str, usize> = HashMap::new();

    for (rule_idx, rule) in rules.iter().enumerate() {
        if rule.keywords.is_empty() {
            rules_without_keywords.push(rule_idx);
            continue;
        }

        for &keyword in rule.keywords {
            if let Some(&existing_idx) = keyword_positions.get(keyword) {
                keyword_to_rules[existing_idx].push(rule_idx);
            } else {
                let new_idx = keywords.len();
                keyword_positions.insert(keyword, new_idx);
                keywords.push(keyword.to_string());
                keyword_to_rules.push(vec![rule_idx]);
            }
        }
    }

    KeywordIndex {
        keywords,
        keyword_to_rules,
        rules_without_keywords,
    }
}

fn build_automaton(keywords: &[String]) -> Option<AhoCorasick> {
    if keywords.is_empty() {
        return None;
    }

    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(aho_corasick::MatchKind::LeftmostLongest)
        .build(keywords)
        .ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests")]

    use super::*;
    use crate::test_utils::make_rule;

    #[test]
    fn severity_orders_low_medium_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn severity_display_formats_as_lowercase_string() {
        assert_eq!(format!("{}", Severity::Low), "low");
        assert_eq!(format!("{}", Severity::Medium), "medium");
        assert_eq!(format!("{}", Severity::High), "high");
    }

    #[test]
    fn severity_from_str_is_case_insensitive() {
        assert_eq!(Severity::from_str("LOW"), Ok(Severity::Low));
        assert_eq!(Severity::from_str("High"), Ok(Severity::High));
    }

    #[test]
    fn severity_from_str_rejects_unknown_values() {
        let err = Severity::from_str("critical").unwrap_err();
        assert_eq!(err.invalid_value(), "critical");
        assert!(err.to_string().contains("expected one of"));
    }

    #[test]
    fn builtin_compiles_all_rules() {
        let rules = RuleSet::builtin().unwrap();
        assert_eq!(rules.len(), BUILTIN_RULES.len());
    }

    #[test]
    fn builtin_covers_every_severity() {
        let rules = RuleSet::builtin().unwrap();
        for severity in Severity::ALL {
            assert!(
                rules.rules().iter().any(|r| r.severity == severity),
                "no builtin rule with severity {severity}"
            );
        }
    }

    #[test]
    fn builtin_rules_are_ordered_high_to_low() {
        let rules = RuleSet::builtin().unwrap();
        let severities: Vec<Severity> = rules.rules().iter().map(|r| r.severity).collect();
        let mut sorted = severities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(severities, sorted);
    }

    #[test]
    fn builtin_rules_have_at_most_one_capture_group() {
        // The snippet extraction consults group 1 only; a second meaningful
        // group would silently change which text is reported.
        let rules = RuleSet::builtin().unwrap();
        for rule in rules.rules() {
            assert!(
                rule.regex.captures_len() <= 2,
                "rule '{}' defines more than one capture group",
                rule.label
            );
        }
    }

    #[test]
    fn empty_rule_set_is_empty() {
        let rules = RuleSet::new(vec![]);
        assert!(rules.is_empty());
        assert_eq!(rules.len(), 0);
    }

    #[test]
    fn get_returns_rules_in_order() {
        let r1 = make_rule("First", Severity::High, r"AAA", &[]);
        let r2 = make_rule("Second", Severity::Low, r"BBB", &[]);
        let rules = RuleSet::new(vec![r1, r2]);

        assert_eq!(rules.get(0).unwrap().label, "First");
        assert_eq!(rules.get(1).unwrap().label, "Second");
        assert!(rules.get(2).is_none());
    }

    #[test]
    fn candidate_rules_skips_rules_whose_keywords_are_absent() {
        let with_kw = make_rule("GitHub", Severity::Medium, r"ghp_[a-z]{10}", &["ghp_"]);
        let no_kw = make_rule("Bare", Severity::Low, r"SECRET_[A-Z]{4}", &[]);
        let rules = RuleSet::new(vec![with_kw, no_kw]);

        let candidates = rules.candidate_rules("nothing interesting here");
        assert_eq!(candidates, vec![1]);
    }

    #[test]
    fn candidate_rules_matches_keywords_case_insensitively() {
        let rule = make_rule("Token", Severity::Medium, r"token=\w+", &["TOKEN"]);
        let rules = RuleSet::new(vec![rule]);

        assert_eq!(rules.candidate_rules("token=abc"), vec![0]);
    }

    #[test]
    fn candidate_rules_maps_shared_keywords_to_all_rules() {
        let r1 = make_rule("One", Severity::Medium, r"ghp_\w+", &["ghp_"]);
        let r2 = make_rule("Two", Severity::Medium, r"ghp_[0-9]+", &["ghp_"]);
        let rules = RuleSet::new(vec![r1, r2]);

        assert_eq!(rules.candidate_rules("x = ghp_123"), vec![0, 1]);
    }

    #[test]
    fn debug_impl_shows_rule_count() {
        let rules = RuleSet::new(vec![]);
        let debug = format!("{rules:?}");
        assert!(debug.contains("RuleSet"));
        assert!(debug.contains("rules"));
    }
}
