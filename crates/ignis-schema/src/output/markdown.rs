//! Markdown reference documentation for a schema.

use crate::schema::{FieldSpec, SchemaDocument, humanize, truthy};
use crate::traits::Emitter;
use serde_json::Value;

pub static MARKDOWN_EMITTER: MarkdownEmitter = MarkdownEmitter;

pub struct MarkdownEmitter;

impl Emitter for MarkdownEmitter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn emit(&self, slug: &str, doc: &SchemaDocument) -> String {
        generate_documentation_as(slug, doc)
    }
}

pub fn generate_documentation(doc: &SchemaDocument) -> String {
    generate_documentation_as(doc.slug().unwrap_or_default(), doc)
}

/// Document `doc` registered under `slug`.
pub fn generate_documentation_as(slug: &str, doc: &SchemaDocument) -> String {
    let title = doc
        .label()
        .map(String::from)
        .unwrap_or_else(|| humanize(slug));
    let kind_label = match doc {
        SchemaDocument::PostType(_) => "Post Type",
        SchemaDocument::Taxonomy(_) => "Taxonomy",
    };

    let mut lines = vec![
        format!("# {}", title),
        String::new(),
        format!("**{}:** `{}`", kind_label, slug),
        String::new(),
    ];

    if let Some(description) = doc.description() {
        lines.push(description.to_string());
        lines.push(String::new());
    }

    lines.push("## REST API".to_string());
    lines.push(String::new());
    let rest_enabled = doc.rest_enabled();
    lines.push(format!(
        "- **Enabled:** {}",
        if rest_enabled { "Yes" } else { "No" }
    ));
    if rest_enabled {
        lines.push(format!(
            "- **Endpoint:** `/wp-json/wp/v2/{}`",
            doc.rest_base().unwrap_or(slug)
        ));
    }
    lines.push(String::new());

    if !doc.fields().is_empty() {
        lines.push("## Fields".to_string());
        lines.push(String::new());
        for field in doc.fields() {
            push_field(&mut lines, field);
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_field(lines: &mut Vec<String>, field: &FieldSpec) {
    let required = if field.required { " **[Required]**" } else { "" };
    lines.push(format!("### `{}`{}", field.key, required));
    lines.push(String::new());
    lines.push(format!("- **Label:** {}", field.label_or_default()));
    lines.push(format!(
        "- **Type:** `{}`",
        field.type_name.as_deref().unwrap_or("text")
    ));

    if let Some(instructions) = field.instructions.as_deref().filter(|i| !i.is_empty()) {
        lines.push(format!("- **Instructions:** {}", instructions));
    }

    if let Some(default) = field.default_value.as_ref().filter(|v| truthy(v)) {
        lines.push(format!("- **Default:** `{}`", display_value(default)));
    }

    if field.field_type().is_some_and(|t| t.has_choices()) {
        match field.option("choices") {
            Some(Value::Object(choices)) if !choices.is_empty() => {
                lines.push("- **Choices:**".to_string());
                for (value, label) in choices {
                    lines.push(format!("  - `{}`: {}", value, display_value(label)));
                }
            }
            Some(Value::Array(choices)) if !choices.is_empty() => {
                lines.push("- **Choices:**".to_string());
                for choice in choices {
                    lines.push(format!("  - `{}`", display_value(choice)));
                }
            }
            _ => {}
        }
    }

    lines.push(String::new());
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
