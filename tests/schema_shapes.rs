//! Schema Wire-Shape Tests
//!
//! The schema builder must produce exactly the creation body the remote
//! service expects, and must parse the field descriptors the service
//! returns. These tests pin both directions of that wire contract.

use pretty_assertions::assert_eq;
use serde_json::json;

use basectl::schema::{options, FieldSchema, FieldType, SelectOption, TableSchema};

// ============================================================================
// Creation Body
// ============================================================================

#[test]
fn test_monitoring_targets_creation_body() {
    // The full bootstrap schema for a monitoring-targets table, asserted
    // against the exact body shape the create-table endpoint accepts.
    let schema = TableSchema::new("monitoring_targets")
        .default_view("All Targets")
        .field(FieldSchema::text("target_value"))
        .field(FieldSchema::single_select(
            "platform",
            options(["tiktok", "instagram", "linkedin"]),
        ))
        .field(FieldSchema::single_select("target_type", options(["profile", "hashtag"])))
        .field(FieldSchema::checkbox("active"))
        .field(FieldSchema::number("results_limit"))
        .field(FieldSchema::text("team_notes"));

    let body = schema.creation_body();
    assert_eq!(
        body,
        json!({
            "table": {
                "name": "monitoring_targets",
                "default_view_name": "All Targets",
                "fields": [
                    {"field_name": "target_value", "type": 2},
                    {"field_name": "platform", "type": 3, "property": {"options": [
                        {"name": "tiktok", "color": 0},
                        {"name": "instagram", "color": 1},
                        {"name": "linkedin", "color": 2}
                    ]}},
                    {"field_name": "target_type", "type": 3, "property": {"options": [
                        {"name": "profile", "color": 0},
                        {"name": "hashtag", "color": 1}
                    ]}},
                    {"field_name": "active", "type": 7},
                    {"field_name": "results_limit", "type": 11},
                    {"field_name": "team_notes", "type": 2}
                ]
            }
        })
    );
}

#[test]
fn test_content_table_creation_body_field_types() {
    // A content table exercises the URL type and a review-status select.
    let schema = TableSchema::new("collected_content")
        .default_view("Recent Content")
        .field(FieldSchema::text("content_id"))
        .field(FieldSchema::url("video_url"))
        .field(FieldSchema::number("likes"))
        .field(FieldSchema::single_select(
            "team_status",
            options(["new", "reviewed", "approved", "ignored"]),
        ));

    let body = schema.creation_body();
    let fields = body["table"]["fields"].as_array().unwrap();

    assert_eq!(fields[0]["type"], 2);
    assert_eq!(fields[1]["type"], 15);
    assert_eq!(fields[2]["type"], 11);
    assert_eq!(fields[3]["type"], 3);
    assert_eq!(fields[3]["property"]["options"].as_array().unwrap().len(), 4);
}

#[test]
fn test_default_view_is_optional() {
    let schema = TableSchema::new("bare").field(FieldSchema::text("only"));
    let body = schema.creation_body();

    assert_eq!(body["table"]["name"], "bare");
    assert!(body["table"].get("default_view_name").is_none());
}

#[test]
fn test_non_select_fields_carry_no_property() {
    for field in [
        FieldSchema::text("a"),
        FieldSchema::number("b"),
        FieldSchema::checkbox("c"),
        FieldSchema::date("d"),
        FieldSchema::url("e"),
        FieldSchema::link("f"),
    ] {
        let value = serde_json::to_value(&field).unwrap();
        assert!(value.get("property").is_none(), "{} must not carry a property", field.field_name);
        assert!(value.get("field_id").is_none());
    }
}

// ============================================================================
// Schema Files
// ============================================================================

#[test]
fn test_schema_round_trips_through_its_file_form() {
    // The CLI loads schemas from JSON files; the file form is the struct's
    // own serde shape.
    let schema = TableSchema::new("monitoring_targets")
        .default_view("All Targets")
        .field(FieldSchema::text("target_value"))
        .field(FieldSchema::single_select("platform", options(["tiktok"])))
        .field(FieldSchema::checkbox("active"));

    let file = serde_json::to_string_pretty(&schema).unwrap();
    let loaded: TableSchema = serde_json::from_str(&file).unwrap();
    assert_eq!(loaded, schema);
}

#[test]
fn test_handwritten_schema_file_parses() {
    let file = r#"{
        "name": "monitoring_targets",
        "default_view_name": "All Targets",
        "fields": [
            {"field_name": "target_value", "type": 2},
            {"field_name": "platform", "type": 3, "property": {"options": [
                {"name": "tiktok", "color": 0}
            ]}},
            {"field_name": "results_limit", "type": 11}
        ]
    }"#;

    let schema: TableSchema = serde_json::from_str(file).unwrap();
    assert_eq!(schema.fields.len(), 3);
    assert_eq!(schema.fields[0].field_type, FieldType::Text);
    assert_eq!(schema.fields[1].field_type, FieldType::SingleSelect);
    assert_eq!(schema.fields[2].field_type, FieldType::Number);
}

#[test]
fn test_schema_file_with_unknown_type_code_is_rejected() {
    let file = r#"{
        "name": "broken",
        "fields": [{"field_name": "x", "type": 99}]
    }"#;

    let result: Result<TableSchema, _> = serde_json::from_str(file);
    assert!(result.is_err());
}

// ============================================================================
// Fetched Field Descriptors
// ============================================================================

#[test]
fn test_fetched_single_select_exposes_options_in_order() {
    // A single-select created with two named options must come back with
    // exactly those two options in the same order.
    let listing = json!([
        {
            "field_id": "fldTgtType",
            "field_name": "target_type",
            "type": 3,
            "property": {"options": [
                {"id": "optp", "name": "profile", "color": 0},
                {"id": "opth", "name": "hashtag", "color": 1}
            ]},
            "is_primary": false
        }
    ]);

    let fields: Vec<FieldSchema> = serde_json::from_value(listing).unwrap();
    let property = fields[0].property.as_ref().unwrap();

    assert_eq!(fields[0].field_type, FieldType::SingleSelect);
    assert_eq!(
        property.options,
        vec![SelectOption::new("profile", 0), SelectOption::new("hashtag", 1)]
    );
}

#[test]
fn test_fetched_descriptor_survives_foreign_property_keys() {
    // Date descriptors carry formatter keys this client does not model.
    let descriptor = json!({
        "field_id": "fldWhen",
        "field_name": "captured_at",
        "type": 5,
        "property": {"date_formatter": "yyyy/MM/dd", "auto_fill": false}
    });

    let field: FieldSchema = serde_json::from_value(descriptor).unwrap();
    assert_eq!(field.field_type, FieldType::Date);
    assert!(field.property.unwrap().options.is_empty());
}
