//! Validation Scenario Tests
//!
//! End-to-end checks of the declarative validator over realistic target
//! records: rule sets loaded from their JSON file form, evaluated against
//! record field maps, producing ordered pass/fail reports. These mirror the
//! configuration checks run against a monitoring-targets table before a
//! downstream pipeline consumes it.

use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

use basectl::validate::{validate, Rule, ValidationReport};

// ============================================================================
// Test Helpers
// ============================================================================

/// The rule file guarding a monitoring-target record, as the CLI loads it
const TARGET_RULES: &str = r#"[
    {"field": "target_value", "kind": "present"},
    {"field": "platform", "kind": "present"},
    {"field": "target_type", "kind": "present"},
    {"field": "active", "kind": "equals", "value": true},
    {"field": "results_limit", "kind": "positive"}
]"#;

fn target_rules() -> Vec<Rule> {
    serde_json::from_str(TARGET_RULES).expect("rule fixture must parse")
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be a JSON object"),
    }
}

// ============================================================================
// Passing Records
// ============================================================================

#[test]
fn test_fully_configured_target_passes() {
    let record = fields(json!({
        "target_value": "@openai",
        "platform": "tiktok",
        "target_type": "profile",
        "active": true,
        "results_limit": 20
    }));

    let report = validate(&record, &target_rules());
    assert_eq!(report, ValidationReport { is_valid: true, reasons: vec![] });
}

#[test]
fn test_extra_fields_do_not_affect_the_report() {
    let record = fields(json!({
        "target_value": "@openai",
        "platform": "tiktok",
        "target_type": "profile",
        "active": true,
        "results_limit": 20,
        "team_notes": "primary competitor",
        "monitoring_strategy": [{"text": "broad"}]
    }));

    let report = validate(&record, &target_rules());
    assert!(report.is_valid);
    assert!(report.reasons.is_empty());
}

// ============================================================================
// Failing Records
// ============================================================================

#[test]
fn test_partially_configured_target_reports_every_violation() {
    let record = fields(json!({
        "target_value": "@openai",
        "active": false,
        "results_limit": 0
    }));

    let report = validate(&record, &target_rules());
    assert!(!report.is_valid);
    assert_eq!(
        report.reasons,
        vec![
            "missing required field \"platform\"".to_string(),
            "missing required field \"target_type\"".to_string(),
            "field \"active\" must equal true".to_string(),
            "field \"results_limit\" must be a positive number".to_string(),
        ]
    );
}

#[test]
fn test_reasons_follow_rule_declaration_order() {
    // Reversing the rule list must reverse the reason order.
    let mut rules = target_rules();
    rules.reverse();

    let record = fields(json!({}));
    let report = validate(&record, &rules);

    assert_eq!(report.reasons.len(), 5);
    assert!(report.reasons[0].contains("results_limit"));
    assert!(report.reasons[4].contains("target_value"));
}

#[test]
fn test_empty_record_fails_every_rule() {
    let report = validate(&Map::new(), &target_rules());
    assert!(!report.is_valid);
    assert_eq!(report.reasons.len(), 5);
}

#[test]
fn test_empty_rule_list_always_passes() {
    let report = validate(&fields(json!({"anything": 1})), &[]);
    assert!(report.is_valid);
    assert!(report.reasons.is_empty());
}

// ============================================================================
// Determinism and Purity
// ============================================================================

#[test]
fn test_repeated_validation_is_identical() {
    let record = fields(json!({
        "target_value": "",
        "platform": "tiktok",
        "active": true,
        "results_limit": -1
    }));
    let rules = target_rules();

    let record_before = record.clone();
    let rules_before = rules.clone();

    let first = validate(&record, &rules);
    let second = validate(&record, &rules);

    assert_eq!(first, second);
    assert_eq!(record, record_before);
    assert_eq!(rules, rules_before);
}

// ============================================================================
// Report Serialization
// ============================================================================

#[test]
fn test_report_serializes_for_envelope_output() {
    let record = fields(json!({"target_value": "@openai"}));
    let report = validate(&record, &[Rule::present("target_value"), Rule::present("platform")]);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        json!({
            "is_valid": false,
            "reasons": ["missing required field \"platform\""]
        })
    );
}

#[test]
fn test_custom_messages_surface_in_reports() {
    let rules = vec![
        Rule::present("platform").with_message("platform must be set before the first run"),
        Rule::positive("results_limit"),
    ];

    let report = validate(&fields(json!({"results_limit": 10})), &rules);
    assert_eq!(report.reasons, vec!["platform must be set before the first run".to_string()]);
}
