//! Structural validation of schema documents.
//!
//! Validation never fails: every problem found is collected and returned, in
//! document order, for the caller to present.

use crate::schema::{FieldSpec, FieldType, PostTypeSchema, SchemaDocument, TaxonomySchema};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

pub const POST_TYPE_MAX_LEN: usize = 20;
pub const TAXONOMY_MAX_LEN: usize = 32;

static POST_TYPE_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid regex"));
static TAXONOMY_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid regex"));
static FIELD_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid regex"));

/// One problem found in a schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (`features.spec_name`), or `None`
    /// for document-level problems.
    pub path: Option<String>,
    pub message: String,
}

impl ValidationError {
    fn document(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
        }
    }

    fn field(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: Some(path.to_string()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validate a document with the rules for its kind.
pub fn validate(doc: &SchemaDocument) -> Vec<ValidationError> {
    match doc {
        SchemaDocument::PostType(schema) => validate_post_type(schema),
        SchemaDocument::Taxonomy(schema) => validate_taxonomy(schema),
    }
}

pub fn validate_post_type(schema: &PostTypeSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_identity(
        &mut errors,
        "post_type",
        schema.slug.as_deref(),
        POST_TYPE_MAX_LEN,
        &POST_TYPE_SLUG,
        "lowercase letters, numbers, and underscores",
    );
    check_label(&mut errors, schema.label.as_deref());
    validate_fields(&mut errors, &schema.fields, "");
    errors
}

pub fn validate_taxonomy(schema: &TaxonomySchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_identity(
        &mut errors,
        "taxonomy",
        schema.slug.as_deref(),
        TAXONOMY_MAX_LEN,
        &TAXONOMY_SLUG,
        "lowercase letters, numbers, underscores, and hyphens",
    );
    check_label(&mut errors, schema.label.as_deref());
    validate_fields(&mut errors, &schema.fields, "");
    errors
}

/// Length and character set are checked independently; both may fire.
fn check_identity(
    errors: &mut Vec<ValidationError>,
    name: &str,
    slug: Option<&str>,
    max_len: usize,
    pattern: &Regex,
    allowed: &str,
) {
    let Some(slug) = slug.filter(|s| !s.is_empty()) else {
        errors.push(ValidationError::document(format!(
            "Missing required field: {}",
            name
        )));
        return;
    };

    if slug.chars().count() > max_len {
        errors.push(ValidationError::document(format!(
            "{} must be {} characters or less",
            name, max_len
        )));
    }
    if !pattern.is_match(slug) {
        errors.push(ValidationError::document(format!(
            "{} must contain only {}",
            name, allowed
        )));
    }
}

fn check_label(errors: &mut Vec<ValidationError>, label: Option<&str>) {
    if label.is_none_or(str::is_empty) {
        errors.push(ValidationError::document("Missing required field: label"));
    }
}

fn validate_fields(errors: &mut Vec<ValidationError>, fields: &[FieldSpec], scope: &str) {
    for field in fields {
        validate_field(errors, field, scope);
    }
}

fn validate_field(errors: &mut Vec<ValidationError>, field: &FieldSpec, scope: &str) {
    let path = join_path(scope, &field.key);

    if !FIELD_KEY.is_match(&field.key) {
        errors.push(ValidationError::field(
            &path,
            format!(
                "Field key '{}' must contain only lowercase letters, numbers, and underscores",
                path
            ),
        ));
    }

    let type_name = field.type_name.as_deref().filter(|t| !t.is_empty());
    match type_name {
        None => errors.push(ValidationError::field(
            &path,
            format!("Field '{}' missing required property: type", path),
        )),
        Some(t) if t.parse::<FieldType>().is_err() => errors.push(ValidationError::field(
            &path,
            format!("Field '{}' has invalid type: {}", path, t),
        )),
        Some(_) => {}
    }

    if field.label.as_deref().is_none_or(str::is_empty) {
        errors.push(ValidationError::field(
            &path,
            format!("Field '{}' missing required property: label", path),
        ));
    }

    match field.field_type() {
        Some(t) if t.has_sub_fields() => validate_fields(errors, &field.sub_fields, &path),
        Some(FieldType::FlexibleContent) => {
            for layout in &field.layouts {
                validate_fields(errors, &layout.sub_fields, &join_path(&path, &layout.key));
            }
        }
        _ => {}
    }

    if field.has_conditional_logic() && !matches!(field.conditional_logic, Some(Value::Array(_))) {
        errors.push(ValidationError::field(
            &path,
            format!("Field '{}' conditional_logic must be an array", path),
        ));
    }
}

fn join_path(scope: &str, key: &str) -> String {
    if scope.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", scope, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Format, parse_str};

    fn errors_for(yaml: &str) -> Vec<String> {
        let doc = parse_str(yaml, Format::Yaml, None).unwrap();
        validate(&doc).into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn valid_post_type_has_no_errors() {
        let errors = errors_for(
            "post_type: product\nlabel: Products\nfields:\n  price:\n    type: number\n    label: Price\n",
        );
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn missing_identity_and_label() {
        let errors = errors_for("description: nothing else\n");
        assert_eq!(
            errors,
            vec![
                "Missing required field: post_type",
                "Missing required field: label"
            ]
        );
    }

    #[test]
    fn slug_length_and_pattern_fire_independently() {
        let errors = errors_for("post_type: This-Is-A-Very-Long-Post-Type\nlabel: X\n");
        assert_eq!(
            errors,
            vec![
                "post_type must be 20 characters or less",
                "post_type must contain only lowercase letters, numbers, and underscores",
            ]
        );
    }

    #[test]
    fn taxonomy_rules_allow_hyphens_and_longer_slugs() {
        let errors = errors_for("taxonomy: product-category-for-the-shop\nlabel: Categories\n");
        assert!(errors.is_empty(), "{:?}", errors);

        let errors = errors_for("taxonomy: a_really_long_taxonomy_slug_over_the_limit\nlabel: X\n");
        assert_eq!(errors, vec!["taxonomy must be 32 characters or less"]);
    }

    #[test]
    fn field_rules() {
        let errors = errors_for(
            r#"
post_type: product
label: Products
fields:
  Bad-Key:
    type: text
    label: Bad
  untyped:
    label: Untyped
  odd:
    type: colour
    label: Odd
  unlabeled:
    type: text
  gated:
    type: text
    label: Gated
    conditional_logic: "yes"
"#,
        );
        assert_eq!(
            errors,
            vec![
                "Field key 'Bad-Key' must contain only lowercase letters, numbers, and underscores",
                "Field 'untyped' missing required property: type",
                "Field 'odd' has invalid type: colour",
                "Field 'unlabeled' missing required property: label",
                "Field 'gated' conditional_logic must be an array",
            ]
        );
    }

    #[test]
    fn nested_fields_are_validated_with_their_path() {
        let doc = parse_str(
            r#"
post_type: product
label: Products
fields:
  specs:
    type: repeater
    label: Specs
    sub_fields:
      spec_name:
        type: text
  blocks:
    type: flexible_content
    label: Blocks
    layouts:
      hero:
        label: Hero
        sub_fields:
          heading:
            label: Heading
"#,
            Format::Yaml,
            None,
        )
        .unwrap();

        let errors = validate(&doc);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path.as_deref(), Some("specs.spec_name"));
        assert_eq!(
            errors[0].to_string(),
            "Field 'specs.spec_name' missing required property: label"
        );
        assert_eq!(errors[1].path.as_deref(), Some("blocks.hero.heading"));
    }
}
