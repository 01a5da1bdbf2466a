//! Record Validation
//!
//! This module checks a record's field map against a declarative rule list
//! and produces a pass/fail report with itemized reasons.
//!
//! # Rules
//! A rule is a (field, predicate, message) triple. Three predicates cover
//! the configuration checks this tool performs:
//! - `Present`: the field exists and is non-empty
//! - `Equals`: the field equals an expected value exactly
//! - `Positive`: the field is a number greater than zero
//!
//! Rule sets are plain serde data, so they can be declared in JSON files
//! rather than code.
//!
//! # Reports
//! Validation is local and pure: no network calls, no input mutation, and
//! identical inputs always produce identical reports. A failing report is
//! an ordinary value, not an error — failing validation is an expected
//! outcome for the callers of this module.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Check applied to a single field's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Field must exist and be non-empty
    Present,
    /// Field must equal the expected value exactly
    Equals { value: Value },
    /// Field must be a number greater than zero
    Positive,
}

/// One validation rule: a field, a predicate, and an optional message
///
/// When no message is given, a default is derived from the field name and
/// predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Field name the rule applies to
    pub field: String,

    /// Predicate the field's value must satisfy
    #[serde(flatten)]
    pub predicate: Predicate,

    /// Reason reported when the rule is violated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Rule {
    /// Require the field to be present and non-empty
    #[must_use]
    pub fn present(field: impl Into<String>) -> Self {
        Self { field: field.into(), predicate: Predicate::Present, message: None }
    }

    /// Require the field to equal the expected value
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { field: field.into(), predicate: Predicate::Equals { value: value.into() }, message: None }
    }

    /// Require the field to be a positive number
    #[must_use]
    pub fn positive(field: impl Into<String>) -> Self {
        Self { field: field.into(), predicate: Predicate::Positive, message: None }
    }

    /// Replace the default failure message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether the rule holds for the given field map
    fn holds(&self, fields: &Map<String, Value>) -> bool {
        let value = fields.get(&self.field);
        match &self.predicate {
            Predicate::Present => value.is_some_and(non_empty),
            Predicate::Equals { value: expected } => value == Some(expected),
            Predicate::Positive => {
                value.and_then(Value::as_f64).is_some_and(|number| number > 0.0)
            }
        }
    }

    /// Failure reason for this rule
    fn reason(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match &self.predicate {
            Predicate::Present => format!("missing required field \"{}\"", self.field),
            Predicate::Equals { value } => {
                format!("field \"{}\" must equal {value}", self.field)
            }
            Predicate::Positive => {
                format!("field \"{}\" must be a positive number", self.field)
            }
        }
    }
}

/// Outcome of validating one record against a rule list
///
/// Derived and ephemeral: produced per validation call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff no rule was violated
    pub is_valid: bool,

    /// One reason per violated rule, in rule-declaration order
    pub reasons: Vec<String>,
}

/// Validate a record's field map against a rule list
///
/// Rules are evaluated in declaration order; every violated rule appends
/// its reason. The inputs are borrowed and never mutated.
#[must_use]
pub fn validate(fields: &Map<String, Value>, rules: &[Rule]) -> ValidationReport {
    let reasons: Vec<String> =
        rules.iter().filter(|rule| !rule.holds(fields)).map(Rule::reason).collect();

    ValidationReport { is_valid: reasons.is_empty(), reasons }
}

/// Non-empty check used by the `Present` predicate
///
/// Null, empty strings, and empty arrays are treated as absent. Numbers and
/// booleans always count as present; zero and false have dedicated
/// predicates when they matter.
fn non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
