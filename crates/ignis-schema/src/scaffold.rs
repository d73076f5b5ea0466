//! Starter schemas and identifier sanitizing.
//!
//! The prompt is stored verbatim as the schema's description; the field set
//! is a fixed template to be edited by hand.

use crate::schema::{
    FieldSpec, FieldType, PostTypeSchema, RestApi, Rewrite, RewriteRules, TaxonomySchema, humanize,
};
use crate::validate::POST_TYPE_MAX_LEN;
use serde_json::json;

const DEFAULT_MENU_ICON: &str = "dashicons-admin-generic";

fn labels(slug: &str) -> (String, String) {
    let label = humanize(slug);
    let singular = label.trim_end_matches('s').to_string();
    (label, singular)
}

fn rewrite_for(slug: &str) -> Option<Rewrite> {
    Some(Rewrite::Rules(RewriteRules {
        slug: Some(slug.to_string()),
        with_front: Some(false),
        hierarchical: None,
    }))
}

fn rest_enabled() -> Option<RestApi> {
    Some(RestApi {
        enabled: Some(true),
        ..Default::default()
    })
}

pub fn scaffold_post_type(slug: &str, prompt: &str) -> PostTypeSchema {
    let (label, singular) = labels(slug);
    PostTypeSchema {
        slug: Some(slug.to_string()),
        label: Some(label),
        singular_label: Some(singular),
        description: Some(prompt.to_string()),
        public: Some(true),
        show_in_rest: Some(true),
        has_archive: Some(true),
        supports: Some(
            ["title", "editor", "thumbnail"]
                .into_iter()
                .map(String::from)
                .collect(),
        ),
        rewrite: rewrite_for(slug),
        rest_api: rest_enabled(),
        menu_icon: Some(DEFAULT_MENU_ICON.to_string()),
        ..Default::default()
    }
    .with_fields(vec![
        FieldSpec::new("name", FieldType::Text)
            .with_label("Name")
            .with_required(true),
        FieldSpec::new("description", FieldType::Textarea)
            .with_label("Description")
            .with_option("rows", json!(4)),
    ])
}

pub fn scaffold_taxonomy(slug: &str, prompt: &str) -> TaxonomySchema {
    let (label, singular) = labels(slug);
    TaxonomySchema {
        slug: Some(slug.to_string()),
        label: Some(label),
        singular_label: Some(singular),
        description: Some(prompt.to_string()),
        public: Some(true),
        show_in_rest: Some(true),
        hierarchical: Some(false),
        show_admin_column: Some(true),
        rewrite: rewrite_for(slug),
        rest_api: rest_enabled(),
        ..Default::default()
    }
}

/// Lowercase, map anything outside `[a-z0-9_]` to `_`, collapse and trim
/// underscores, and cut to the post-type length limit.
pub fn sanitize_post_type_slug(input: &str) -> String {
    let mapped: String = input
        .to_lowercase()
        .chars()
        .map(|c| if is_identifier_char(c) { c } else { '_' })
        .collect();
    let mut slug = collapse_underscores(&mapped);
    slug.truncate(POST_TYPE_MAX_LEN);
    slug
}

/// A text field named after `label`, or `None` when the label has no
/// usable characters for a key.
pub fn scaffold_field(label: &str) -> Option<FieldSpec> {
    let key = sanitize_field_key(label);
    if key.is_empty() {
        return None;
    }
    Some(FieldSpec::new(key, FieldType::Text).with_label(label.trim()))
}

/// Lowercase, spaces to `_`, drop anything else outside `[a-z0-9_]`,
/// collapse and trim underscores.
pub fn sanitize_field_key(input: &str) -> String {
    let mapped: String = input
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| is_identifier_char(*c))
        .collect();
    collapse_underscores(&mapped)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

fn collapse_underscores(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
