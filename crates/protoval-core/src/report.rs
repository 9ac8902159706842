//! # Validation Report
//!
//! Findings and the report assembled from them.
//!
//! ## Design
//!
//! Validators do not share an accumulator. Each one returns an owned
//! [`Findings`] value and callers merge children by concatenation, so the
//! order of messages is exactly the traversal order.
//!
//! Every [`Issue`] carries an [`IssueClass`]:
//!
//! - `Structural`: the document has the wrong shape. A wrong JSON type, a
//!   missing required key, an unknown command tag or an unloadable document.
//! - `Semantic`: the shape is right but a business rule fails. An unresolved
//!   reference, an out-of-range value or a value outside a fixed vocabulary.
//!
//! On the wire a report is:
//!
//! ```json
//! {
//!   "info": {},
//!   "salient": { "containerCount": 2, "toolCount": 1, "instructionCount": 3 },
//!   "errors": ["..."],
//!   "warnings": ["..."]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::ProtovalError;

/// Class of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueClass {
    /// Shape or type problem.
    Structural,
    /// Business-rule violation.
    Semantic,
}

impl fmt::Display for IssueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => f.write_str("structural"),
            Self::Semantic => f.write_str("semantic"),
        }
    }
}

/// A single human-readable finding.
///
/// Serializes as its message string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Structural or semantic.
    pub class: IssueClass,
    /// Message naming the offending identifier and its coordinate.
    pub message: String,
}

impl Issue {
    /// A shape or type finding.
    pub fn structural(message: impl Into<String>) -> Self {
        Self {
            class: IssueClass::Structural,
            message: message.into(),
        }
    }

    /// A business-rule finding.
    pub fn semantic(message: impl Into<String>) -> Self {
        Self {
            class: IssueClass::Semantic,
            message: message.into(),
        }
    }

    /// Whether this is a structural finding.
    pub fn is_structural(&self) -> bool {
        self.class == IssueClass::Structural
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

/// Errors and warnings produced by one validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Findings {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Findings {
    /// No findings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single error.
    pub fn error(issue: Issue) -> Self {
        Self {
            errors: vec![issue],
            warnings: Vec::new(),
        }
    }

    /// A single warning.
    pub fn warning(issue: Issue) -> Self {
        Self {
            errors: Vec::new(),
            warnings: vec![issue],
        }
    }

    /// Record an error.
    pub fn push_error(&mut self, issue: Issue) {
        self.errors.push(issue);
    }

    /// Record a warning.
    pub fn push_warning(&mut self, issue: Issue) {
        self.warnings.push(issue);
    }

    /// Append another validator's findings after this one's.
    pub fn absorb(&mut self, other: Findings) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Concatenate two sets of findings.
    pub fn merge(mut self, other: Findings) -> Self {
        self.absorb(other);
        self
    }

    /// Errors in order.
    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    /// Warnings in order.
    pub fn warnings(&self) -> &[Issue] {
        &self.warnings
    }

    /// Whether any error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Consume into `(errors, warnings)`.
    pub fn into_parts(self) -> (Vec<Issue>, Vec<Issue>) {
        (self.errors, self.warnings)
    }
}

impl Extend<Findings> for Findings {
    fn extend<I: IntoIterator<Item = Findings>>(&mut self, iter: I) {
        for findings in iter {
            self.absorb(findings);
        }
    }
}

impl FromIterator<Findings> for Findings {
    fn from_iter<I: IntoIterator<Item = Findings>>(iter: I) -> Self {
        let mut merged = Findings::new();
        merged.extend(iter);
        merged
    }
}

/// Summary counts carried by every report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salient {
    /// Declared deck containers.
    pub container_count: usize,
    /// Declared head tools.
    pub tool_count: usize,
    /// Instructions in the protocol.
    pub instruction_count: usize,
}

/// The result of one validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// The protocol's `info` section, or an empty mapping.
    pub info: Value,
    /// Summary counts.
    pub salient: Salient,
    /// Fatal findings, in traversal order.
    pub errors: Vec<Issue>,
    /// Advisory findings, in traversal order.
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    /// Assemble a report from merged findings.
    pub fn new(info: Value, salient: Salient, findings: Findings) -> Self {
        let (errors, warnings) = findings.into_parts();
        Self {
            info,
            salient,
            errors,
            warnings,
        }
    }

    /// No errors. Warnings do not make a protocol invalid.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Errors about document shape.
    pub fn structural_errors(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().filter(|issue| issue.is_structural())
    }

    /// Errors about business rules.
    pub fn semantic_errors(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().filter(|issue| !issue.is_structural())
    }

    /// Error messages as plain strings.
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|i| i.message.as_str()).collect()
    }

    /// Warning messages as plain strings.
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|i| i.message.as_str()).collect()
    }

    /// Serialize to the wire format.
    pub fn to_json(&self, pretty: bool) -> Result<String, ProtovalError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_is_concatenation_in_order() {
        let mut first = Findings::error(Issue::structural("e1"));
        first.push_warning(Issue::semantic("w1"));
        let mut second = Findings::error(Issue::semantic("e2"));
        second.push_warning(Issue::semantic("w2"));

        let merged = first.merge(second);
        let (errors, warnings) = merged.into_parts();
        let errors: Vec<_> = errors.iter().map(|i| i.message.as_str()).collect();
        let warnings: Vec<_> = warnings.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(errors, vec!["e1", "e2"]);
        assert_eq!(warnings, vec!["w1", "w2"]);
    }

    #[test]
    fn test_collect_from_iterator() {
        let merged: Findings = (0..3)
            .map(|i| Findings::warning(Issue::semantic(format!("w{i}"))))
            .collect();
        assert!(!merged.has_errors());
        assert_eq!(merged.warnings().len(), 3);
        assert_eq!(merged.warnings()[2].message, "w2");
    }

    #[test]
    fn test_empty_findings() {
        let f = Findings::new();
        assert!(f.is_empty());
        assert!(!f.has_errors());
    }

    #[test]
    fn test_report_wire_format() {
        let mut findings = Findings::error(Issue::structural("missing \"deck\""));
        findings.push_warning(Issue::semantic("no info"));
        let report = ValidationReport::new(
            json!({ "name": "demo" }),
            Salient {
                container_count: 2,
                tool_count: 1,
                instruction_count: 0,
            },
            findings,
        );

        let value: Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "info": { "name": "demo" },
                "salient": { "containerCount": 2, "toolCount": 1, "instructionCount": 0 },
                "errors": ["missing \"deck\""],
                "warnings": ["no info"]
            })
        );
    }

    #[test]
    fn test_report_classifies_errors() {
        let mut findings = Findings::error(Issue::structural("s"));
        findings.push_error(Issue::semantic("m"));
        let report = ValidationReport::new(json!({}), Salient::default(), findings);
        assert!(!report.is_valid());
        assert_eq!(report.structural_errors().count(), 1);
        assert_eq!(report.semantic_errors().count(), 1);
        assert_eq!(report.error_messages(), vec!["s", "m"]);
    }

    #[test]
    fn test_valid_versus_clean() {
        let report = ValidationReport::new(
            json!({}),
            Salient::default(),
            Findings::warning(Issue::semantic("advisory")),
        );
        assert!(report.is_valid());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_pretty_json_is_multiline() {
        let report = ValidationReport::new(json!({}), Salient::default(), Findings::new());
        assert!(report.to_json(true).unwrap().contains('\n'));
        assert!(!report.to_json(false).unwrap().contains('\n'));
    }
}
