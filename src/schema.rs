//! Table Schema Description
//!
//! This module declares table schemas for the create-table operation and
//! models the field descriptors the service returns when fields are fetched.
//!
//! # Field Types
//! Field types are a closed enum carrying the numeric wire codes the service
//! expects, so no call site ever sees a magic number. Only the select types
//! carry an options payload.
//!
//! A table's field set is fixed at creation in this design: there is no
//! field migration operation.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Plain text
    Text,
    /// Single-choice select with a fixed option list
    SingleSelect,
    /// Multi-choice select with a fixed option list
    MultiSelect,
    /// Date
    Date,
    /// Checkbox (boolean)
    Checkbox,
    /// Number
    Number,
    /// URL
    Url,
    /// Link to records in another table
    Link,
}

impl FieldType {
    /// Numeric wire code for this type
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Text => 2,
            Self::SingleSelect => 3,
            Self::MultiSelect => 4,
            Self::Date => 5,
            Self::Checkbox => 7,
            Self::Number => 11,
            Self::Url => 15,
            Self::Link => 21,
        }
    }

    /// Decode a wire code into a field type
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(Self::Text),
            3 => Some(Self::SingleSelect),
            4 => Some(Self::MultiSelect),
            5 => Some(Self::Date),
            7 => Some(Self::Checkbox),
            11 => Some(Self::Number),
            15 => Some(Self::Url),
            21 => Some(Self::Link),
            _ => None,
        }
    }

    /// Get the type name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::SingleSelect => "single_select",
            Self::MultiSelect => "multi_select",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Url => "url",
            Self::Link => "link",
        }
    }

    /// Whether this type carries a select-options payload
    #[must_use]
    pub const fn is_select(self) -> bool {
        matches!(self, Self::SingleSelect | Self::MultiSelect)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// On the wire a field type is its numeric code.
impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown field type code {code}")))
    }
}

/// One option of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Option label shown to users
    pub name: String,

    /// Color index assigned to the option
    #[serde(default)]
    pub color: i64,
}

impl SelectOption {
    /// Create an option with an explicit color index
    #[must_use]
    pub fn new(name: impl Into<String>, color: i64) -> Self {
        Self { name: name.into(), color }
    }
}

/// Build the options for a select field, coloring them in listed order
#[must_use]
pub fn options<I, S>(names: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| SelectOption::new(name, index as i64))
        .collect()
}

/// Type-specific field property payload
///
/// Only the option list is modeled; descriptors fetched from the service may
/// carry extra keys for other types, which are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProperty {
    /// Options of a select field, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

/// A typed column definition within a table
///
/// Serves both directions: declared for table creation (no `field_id`) and
/// parsed from the service's field listing (with one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Identifier assigned by the service; absent in creation payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,

    /// Field name, unique within its table
    pub field_name: String,

    /// Field type wire code
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Options payload, present only for select types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<FieldProperty>,
}

impl FieldSchema {
    /// Create a field of any non-select type
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self { field_id: None, field_name: name.into(), field_type, property: None }
    }

    /// Create a text field
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// Create a number field
    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Create a checkbox field
    #[must_use]
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Checkbox)
    }

    /// Create a date field
    #[must_use]
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// Create a URL field
    #[must_use]
    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Url)
    }

    /// Create a record-link field
    #[must_use]
    pub fn link(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Link)
    }

    /// Create a single-select field with its options in display order
    #[must_use]
    pub fn single_select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            field_id: None,
            field_name: name.into(),
            field_type: FieldType::SingleSelect,
            property: Some(FieldProperty { options }),
        }
    }

    /// Create a multi-select field with its options in display order
    #[must_use]
    pub fn multi_select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            field_id: None,
            field_name: name.into(),
            field_type: FieldType::MultiSelect,
            property: Some(FieldProperty { options }),
        }
    }
}

/// Declarative description of a table to create
///
/// Assembles the exact structure the create-table endpoint expects. The
/// field list is ordered; the service materializes columns in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name, unique within the base
    pub name: String,

    /// Name of the default view created with the table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_view_name: Option<String>,

    /// Ordered column definitions
    pub fields: Vec<FieldSchema>,
}

impl TableSchema {
    /// Start a schema with no fields
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), default_view_name: None, fields: Vec::new() }
    }

    /// Set the default view name
    #[must_use]
    pub fn default_view(mut self, name: impl Into<String>) -> Self {
        self.default_view_name = Some(name.into());
        self
    }

    /// Append a field
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Wire body for the create-table request
    #[must_use]
    pub fn creation_body(&self) -> serde_json::Value {
        serde_json::json!({ "table": self })
    }
}
