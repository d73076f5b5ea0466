//! The recursive field grammar shared by post-type and taxonomy schemas.

use super::de::{self, Keyed};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The closed set of field types the compilers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Email,
    Url,
    Password,
    Select,
    Checkbox,
    Radio,
    TrueFalse,
    Wysiwyg,
    Oembed,
    Image,
    File,
    Gallery,
    PostObject,
    Relationship,
    Taxonomy,
    User,
    Repeater,
    Group,
    FlexibleContent,
    DatePicker,
    TimePicker,
    DateTimePicker,
    ColorPicker,
    GoogleMap,
    Link,
}

impl FieldType {
    pub const ALL: [FieldType; 28] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Number,
        FieldType::Email,
        FieldType::Url,
        FieldType::Password,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::TrueFalse,
        FieldType::Wysiwyg,
        FieldType::Oembed,
        FieldType::Image,
        FieldType::File,
        FieldType::Gallery,
        FieldType::PostObject,
        FieldType::Relationship,
        FieldType::Taxonomy,
        FieldType::User,
        FieldType::Repeater,
        FieldType::Group,
        FieldType::FlexibleContent,
        FieldType::DatePicker,
        FieldType::TimePicker,
        FieldType::DateTimePicker,
        FieldType::ColorPicker,
        FieldType::GoogleMap,
        FieldType::Link,
    ];

    /// The type tag as written in schema files.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Url => "url",
            FieldType::Password => "password",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::TrueFalse => "true_false",
            FieldType::Wysiwyg => "wysiwyg",
            FieldType::Oembed => "oembed",
            FieldType::Image => "image",
            FieldType::File => "file",
            FieldType::Gallery => "gallery",
            FieldType::PostObject => "post_object",
            FieldType::Relationship => "relationship",
            FieldType::Taxonomy => "taxonomy",
            FieldType::User => "user",
            FieldType::Repeater => "repeater",
            FieldType::Group => "group",
            FieldType::FlexibleContent => "flexible_content",
            FieldType::DatePicker => "date_picker",
            FieldType::TimePicker => "time_picker",
            FieldType::DateTimePicker => "date_time_picker",
            FieldType::ColorPicker => "color_picker",
            FieldType::GoogleMap => "google_map",
            FieldType::Link => "link",
        }
    }

    /// Types whose values are drawn from a `choices` list.
    pub fn has_choices(self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Checkbox | FieldType::Radio
        )
    }

    /// Types that own nested `sub_fields` directly.
    pub fn has_sub_fields(self) -> bool {
        matches!(self, FieldType::Repeater | FieldType::Group)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type tag is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// One field definition.
///
/// The type tag is kept as written so that documents with unknown types still
/// load and can be reported by the validator; [`FieldSpec::field_type`] gives
/// the typed view. Options the model does not name (`choices`, `min`,
/// `return_format`, ...) stay in [`FieldSpec::options`] in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(skip)]
    pub key: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::flag",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Raw conditional logic; see [`FieldSpec::conditions`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_logic: Option<Value>,
    #[serde(default, with = "de::keyed", skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<FieldSpec>,
    #[serde(default, with = "de::keyed", skip_serializing_if = "Vec::is_empty")]
    pub layouts: Vec<Layout>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl Keyed for FieldSpec {
    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

/// A flexible-content layout: a named alternative set of sub-fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    #[serde(default, with = "de::keyed", skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<FieldSpec>,
}

impl Keyed for Layout {
    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl Layout {
    pub fn label_or_default(&self) -> String {
        non_empty(self.label.as_deref())
            .map(String::from)
            .unwrap_or_else(|| humanize(&self.key))
    }
}

/// One `{field, operator, value}` test against a sibling field.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

/// Disjunction of conjunctions: the field shows when every condition of any
/// one group holds.
pub type ConditionalLogic = Vec<Vec<Condition>>;

impl FieldSpec {
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            type_name: Some(field_type.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    pub fn with_sub_fields(mut self, sub_fields: Vec<FieldSpec>) -> Self {
        self.sub_fields = sub_fields;
        self
    }

    /// The typed field type, or `None` when missing or outside the closed set.
    pub fn field_type(&self) -> Option<FieldType> {
        self.type_name.as_deref().and_then(|t| t.parse().ok())
    }

    /// The declared label, or one derived from the key (`contact_name` → `Contact Name`).
    pub fn label_or_default(&self) -> String {
        non_empty(self.label.as_deref())
            .map(String::from)
            .unwrap_or_else(|| humanize(&self.key))
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name).filter(|v| !v.is_null())
    }

    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(Value::as_str)
    }

    /// Truthiness of an option using the same loose rules as schema flags.
    pub fn option_flag(&self, name: &str) -> bool {
        self.option(name).is_some_and(truthy)
    }

    /// Choice values in declaration order.
    ///
    /// A mapping contributes its keys (`{a: "A"}` → `a`); a plain list
    /// contributes its items.
    pub fn choice_values(&self) -> Vec<String> {
        match self.option("choices") {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            Some(Value::Array(items)) => items.iter().map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Post types referenced by `post_object` / `relationship` fields.
    pub fn related_post_types(&self) -> Vec<String> {
        match self.option("post_type") {
            Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether `conditional_logic` carries anything (null, false, 0, "" and
    /// empty lists count as absent).
    pub fn has_conditional_logic(&self) -> bool {
        self.conditional_logic.as_ref().is_some_and(truthy)
    }

    /// Normalised conditional logic.
    ///
    /// Each top-level entry is a group; a group written as a single condition
    /// object is treated as a one-element group. Conditions without a `field`
    /// reference are dropped.
    pub fn conditions(&self) -> Option<ConditionalLogic> {
        let Some(Value::Array(groups)) = self.conditional_logic.as_ref() else {
            return None;
        };

        let logic: ConditionalLogic = groups
            .iter()
            .map(|group| match group {
                Value::Array(items) => items.iter().filter_map(parse_condition).collect(),
                single => parse_condition(single).into_iter().collect(),
            })
            .filter(|group: &Vec<Condition>| !group.is_empty())
            .collect();

        if logic.is_empty() { None } else { Some(logic) }
    }
}

fn parse_condition(value: &Value) -> Option<Condition> {
    let obj = value.as_object()?;
    let field = obj.get("field").and_then(Value::as_str)?;
    Some(Condition {
        field: field.to_string(),
        operator: obj
            .get("operator")
            .and_then(Value::as_str)
            .unwrap_or("==")
            .to_string(),
        value: obj
            .get("value")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())),
    })
}

/// Loose truthiness: null, false, 0, "", "0" and empty containers are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// `product_category` → `Product Category`.
pub fn humanize(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
