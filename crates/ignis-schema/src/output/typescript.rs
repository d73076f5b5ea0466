//! TypeScript definitions for the REST API.
//!
//! One unit per schema: the `<Name>ACF` fields interface, the entity
//! interface (post or term), response aliases, request types and the shared
//! WordPress helper interfaces. Output is a pure function of the document.

use crate::input::{LoadError, load_kind_directory};
use crate::schema::{
    FieldSpec, FieldType, PostTypeSchema, SchemaDocument, SchemaKind, SchemaSet, TaxonomySchema,
    capitalize, humanize,
};
use crate::traits::Emitter;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Static instance for the registry.
pub static TYPESCRIPT_EMITTER: TypeScriptEmitter = TypeScriptEmitter;

pub struct TypeScriptEmitter;

impl Emitter for TypeScriptEmitter {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn emit(&self, slug: &str, doc: &SchemaDocument) -> String {
        emit_as(slug, doc)
    }
}

const POST_STATUS: &str = "'publish' | 'future' | 'draft' | 'pending' | 'private'";

/// Emit the unit for `doc`, named after its declared slug.
pub fn emit(doc: &SchemaDocument) -> String {
    emit_as(doc.slug().unwrap_or_default(), doc)
}

/// Emit the unit for `doc` registered under `slug`.
pub fn emit_as(slug: &str, doc: &SchemaDocument) -> String {
    let name = to_type_name(slug);
    let label = doc
        .label()
        .map(String::from)
        .unwrap_or_else(|| humanize(slug));

    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(&format!(" * Generated TypeScript types for {}\n", label));
    out.push_str(&format!(" * @generated from schema: {}.yaml\n", slug));
    out.push_str(" */\n\n");

    out.push_str("// ACF Fields Interface\n");
    out.push_str(&format!("export interface {}ACF {{\n", name));
    for field in doc.fields() {
        push_field(&mut out, field, "  ");
    }
    out.push_str("}\n\n");

    match doc {
        SchemaDocument::PostType(schema) => push_post_types(&mut out, slug, &name, schema),
        SchemaDocument::Taxonomy(schema) => push_term_types(&mut out, slug, &name, schema),
    }

    out.push_str(HELPER_TYPES);
    out
}

fn push_field(out: &mut String, field: &FieldSpec, indent: &str) {
    if let Some(label) = field.label.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("{}/** {}\n", indent, label));
        if let Some(instructions) = field.instructions.as_deref().filter(|i| !i.is_empty()) {
            let continued = instructions.replace('\n', &format!("\n{} * ", indent));
            out.push_str(&format!("{} * {}\n", indent, continued));
        }
        out.push_str(&format!("{} */\n", indent));
    }
    out.push_str(&format!(
        "{}{}{}: {};\n",
        indent,
        field.key,
        optional_marker(field),
        map_field_type(field)
    ));
}

fn optional_marker(field: &FieldSpec) -> &'static str {
    if field.required { "" } else { "?" }
}

fn push_post_types(out: &mut String, slug: &str, name: &str, schema: &PostTypeSchema) {
    let editor = schema.declares_support("editor");
    let excerpt = schema.declares_support("excerpt");

    out.push_str("// WordPress Post Interface\n");
    out.push_str(&format!("export interface {} {{\n", name));
    out.push_str("  id: number;\n");
    out.push_str("  date: string;\n");
    out.push_str("  date_gmt: string;\n");
    out.push_str("  modified: string;\n");
    out.push_str("  modified_gmt: string;\n");
    out.push_str("  slug: string;\n");
    out.push_str(&format!("  status: {};\n", POST_STATUS));
    out.push_str(&format!("  type: '{}';\n", slug));
    out.push_str("  link: string;\n");
    out.push_str("  title: {\n    rendered: string;\n  };\n");
    if editor {
        out.push_str("  content: {\n    rendered: string;\n    protected: boolean;\n  };\n");
    }
    if excerpt {
        out.push_str("  excerpt: {\n    rendered: string;\n    protected: boolean;\n  };\n");
    }
    if schema.declares_support("thumbnail") {
        out.push_str("  featured_media: number;\n");
    }
    out.push_str(&format!("  acf: {}ACF;\n", name));
    push_links(out);
    out.push_str("}\n\n");

    push_response_types(out, name);

    out.push_str("// Create/Update Request Type\n");
    out.push_str(&format!("export interface {}CreateRequest {{\n", name));
    out.push_str("  title: string;\n");
    out.push_str(&format!("  status?: {};\n", POST_STATUS));
    if editor {
        out.push_str("  content?: string;\n");
    }
    if excerpt {
        out.push_str("  excerpt?: string;\n");
    }
    out.push_str(&format!("  acf?: Partial<{}ACF>;\n", name));
    out.push_str("}\n\n");
    push_update_request(out, name);
}

fn push_term_types(out: &mut String, slug: &str, name: &str, schema: &TaxonomySchema) {
    let hierarchical = schema.is_hierarchical();

    out.push_str("// WordPress Term Interface\n");
    out.push_str(&format!("export interface {} {{\n", name));
    out.push_str("  id: number;\n");
    out.push_str("  count: number;\n");
    out.push_str("  description: string;\n");
    out.push_str("  link: string;\n");
    out.push_str("  name: string;\n");
    out.push_str("  slug: string;\n");
    out.push_str(&format!("  taxonomy: '{}';\n", slug));
    if hierarchical {
        out.push_str("  parent: number;\n");
    }
    out.push_str("  meta: Record<string, any>;\n");
    out.push_str(&format!("  acf: {}ACF;\n", name));
    push_links(out);
    out.push_str("}\n\n");

    push_response_types(out, name);

    out.push_str("// Create/Update Request Type\n");
    out.push_str(&format!("export interface {}CreateRequest {{\n", name));
    out.push_str("  name: string;\n");
    out.push_str("  description?: string;\n");
    out.push_str("  slug?: string;\n");
    if hierarchical {
        out.push_str("  parent?: number;\n");
    }
    out.push_str(&format!("  acf?: Partial<{}ACF>;\n", name));
    out.push_str("}\n\n");
    push_update_request(out, name);
}

fn push_links(out: &mut String) {
    out.push_str("  _links: {\n");
    out.push_str("    self: Array<{ href: string }>;\n");
    out.push_str("    collection: Array<{ href: string }>;\n");
    out.push_str("  };\n");
}

fn push_response_types(out: &mut String, name: &str) {
    out.push_str("// API Response Types\n");
    out.push_str(&format!("export type {0}Response = {0};\n", name));
    out.push_str(&format!("export type {0}ListResponse = {0}[];\n\n", name));
}

fn push_update_request(out: &mut String, name: &str) {
    out.push_str(&format!(
        "export type {0}UpdateRequest = Partial<{0}CreateRequest>;\n\n",
        name
    ));
}

/// The TypeScript type expression for a field's value.
///
/// Total over every input: missing or unknown types map to `any` (logged).
pub fn map_field_type(field: &FieldSpec) -> String {
    let Some(field_type) = field.field_type() else {
        warn!(
            "field {} has {} type; emitting `any`",
            field.key,
            match field.type_name.as_deref() {
                Some(t) if !t.is_empty() => format!("unknown `{}`", t),
                _ => "no".to_string(),
            }
        );
        return "any".to_string();
    };

    let multiple = field.option_flag("multiple");
    let return_format = |default: &'static str| -> String {
        field
            .option_str("return_format")
            .filter(|f| !f.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    match field_type {
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Email
        | FieldType::Url
        | FieldType::Password
        | FieldType::Wysiwyg
        | FieldType::Oembed
        | FieldType::ColorPicker
        | FieldType::DatePicker
        | FieldType::TimePicker
        | FieldType::DateTimePicker => "string".to_string(),

        FieldType::Number => "number".to_string(),
        FieldType::TrueFalse => "boolean".to_string(),

        FieldType::Select => match choice_union(field) {
            Some(union) if multiple => format!("Array<{}>", union),
            Some(union) => union,
            None => list_of("string", multiple),
        },
        FieldType::Checkbox => match choice_union(field) {
            Some(union) => format!("Array<{}>", union),
            None => "string[]".to_string(),
        },
        FieldType::Radio => choice_union(field).unwrap_or_else(|| "string".to_string()),

        FieldType::Image | FieldType::File => match return_format("array").as_str() {
            "url" => "string".to_string(),
            "id" => "number".to_string(),
            _ if field_type == FieldType::Image => "WPImage".to_string(),
            _ => "WPFile".to_string(),
        },
        FieldType::Gallery => "WPImage[]".to_string(),

        FieldType::PostObject | FieldType::Relationship => {
            if return_format("object") == "id" {
                return list_of("number", multiple);
            }
            match field.related_post_types().as_slice() {
                [single] => list_of(&to_type_name(single), multiple),
                _ => list_of("WPPost", multiple),
            }
        }
        FieldType::Taxonomy => {
            let multiple = matches!(
                field.option_str("field_type").unwrap_or("checkbox"),
                "checkbox" | "multi_select"
            );
            if return_format("id") == "id" {
                list_of("number", multiple)
            } else {
                list_of("WPTerm", multiple)
            }
        }
        FieldType::User => {
            if return_format("array") == "id" {
                list_of("number", multiple)
            } else {
                list_of("WPUser", multiple)
            }
        }

        FieldType::Repeater => match inline_object(&field.sub_fields) {
            Some(shape) => format!("{}[]", shape),
            None => "any[]".to_string(),
        },
        FieldType::Group => {
            inline_object(&field.sub_fields).unwrap_or_else(|| "Record<string, any>".to_string())
        }
        FieldType::FlexibleContent => {
            if field.layouts.is_empty() {
                return "any[]".to_string();
            }
            let variants: Vec<String> = field
                .layouts
                .iter()
                .map(|layout| {
                    let mut props = vec![format!("acf_fc_layout: '{}'", quote(&layout.key))];
                    props.extend(layout.sub_fields.iter().map(inline_property));
                    format!("{{{}}}", props.join("; "))
                })
                .collect();
            format!("Array<{}>", variants.join(" | "))
        }

        FieldType::GoogleMap => "{lat: number; lng: number; address?: string}".to_string(),
        FieldType::Link => match return_format("array").as_str() {
            "url" => "string".to_string(),
            _ => "{url: string; title: string; target: string}".to_string(),
        },
    }
}

fn list_of(ty: &str, multiple: bool) -> String {
    if multiple {
        format!("{}[]", ty)
    } else {
        ty.to_string()
    }
}

fn choice_union(field: &FieldSpec) -> Option<String> {
    let choices = field.choice_values();
    if choices.is_empty() {
        return None;
    }
    Some(
        choices
            .iter()
            .map(|c| format!("'{}'", quote(c)))
            .collect::<Vec<_>>()
            .join(" | "),
    )
}

fn inline_object(fields: &[FieldSpec]) -> Option<String> {
    if fields.is_empty() {
        return None;
    }
    let props: Vec<String> = fields.iter().map(inline_property).collect();
    Some(format!("{{{}}}", props.join("; ")))
}

fn inline_property(field: &FieldSpec) -> String {
    format!(
        "{}{}: {}",
        field.key,
        optional_marker(field),
        map_field_type(field)
    )
}

fn quote(literal: &str) -> String {
    literal.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `product_category` → `ProductCategory`.
pub fn to_type_name(slug: &str) -> String {
    slug.split(['_', ' ', '-'])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// The index unit re-exporting every generated unit, in the given order.
pub fn emit_index<'a>(slugs: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("/**\n * Generated TypeScript types index\n * @generated\n */\n\n");
    for slug in slugs {
        out.push_str(&format!("export * from './{}';\n", slug));
    }
    out
}

/// Write one `<slug>.ts` unit per schema into `output_dir`.
pub fn write_units(schemas: &SchemaSet, output_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    std::fs::create_dir_all(output_dir).map_err(|e| LoadError::write(output_dir, e))?;

    let mut generated = Vec::with_capacity(schemas.len());
    for (slug, doc) in schemas {
        let path = output_dir.join(format!("{}.ts", slug));
        std::fs::write(&path, emit_as(slug, doc)).map_err(|e| LoadError::write(&path, e))?;
        debug!("wrote {}", path.display());
        generated.push(path);
    }
    Ok(generated)
}

/// Write `index.ts` re-exporting `slugs` into `output_dir`.
pub fn write_index<'a>(
    slugs: impl IntoIterator<Item = &'a str>,
    output_dir: &Path,
) -> Result<PathBuf, LoadError> {
    std::fs::create_dir_all(output_dir).map_err(|e| LoadError::write(output_dir, e))?;
    let path = output_dir.join("index.ts");
    std::fs::write(&path, emit_index(slugs)).map_err(|e| LoadError::write(&path, e))?;
    Ok(path)
}

/// Load every `kind` schema in `schema_dir`, write one unit per schema plus
/// `index.ts` into `output_dir`, and return the unit paths.
///
/// Units and index entries follow slug order, so output is stable across
/// filesystems.
pub fn emit_directory(
    schema_dir: &Path,
    output_dir: &Path,
    kind: SchemaKind,
) -> Result<Vec<PathBuf>, LoadError> {
    let schemas = load_kind_directory(schema_dir, kind)?;
    let generated = write_units(&schemas, output_dir)?;
    write_index(schemas.keys().map(String::as_str), output_dir)?;
    Ok(generated)
}

/// Shared WordPress helper interfaces, emitted at the end of every unit.
pub const HELPER_TYPES: &str = r#"// WordPress Helper Types
export interface WPImage {
  ID: number;
  id: number;
  title: string;
  filename: string;
  filesize: number;
  url: string;
  link: string;
  alt: string;
  author: string;
  description: string;
  caption: string;
  name: string;
  status: string;
  uploaded_to: number;
  date: string;
  modified: string;
  menu_order: number;
  mime_type: string;
  type: string;
  subtype: string;
  icon: string;
  width: number;
  height: number;
  sizes: {
    thumbnail?: string;
    'thumbnail-width'?: number;
    'thumbnail-height'?: number;
    medium?: string;
    'medium-width'?: number;
    'medium-height'?: number;
    large?: string;
    'large-width'?: number;
    'large-height'?: number;
    full?: string;
    'full-width'?: number;
    'full-height'?: number;
    [key: string]: string | number | undefined;
  };
}

export interface WPFile {
  ID: number;
  id: number;
  title: string;
  filename: string;
  filesize: number;
  url: string;
  link: string;
  author: string;
  description: string;
  caption: string;
  name: string;
  status: string;
  uploaded_to: number;
  date: string;
  modified: string;
  mime_type: string;
  type: string;
  subtype: string;
  icon: string;
}

export interface WPPost {
  ID: number;
  id: number;
  post_title: string;
  post_type: string;
  post_status: string;
  post_date: string;
  post_modified: string;
}

export interface WPTerm {
  term_id: number;
  name: string;
  slug: string;
  term_group: number;
  term_taxonomy_id: number;
  taxonomy: string;
  description: string;
  parent: number;
  count: number;
}

export interface WPUser {
  ID: number;
  user_firstname: string;
  user_lastname: string;
  user_email: string;
  user_login: string;
  user_nicename: string;
  display_name: string;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Format, parse_str};
    use serde_json::json;

    fn field(value: serde_json::Value) -> FieldSpec {
        let mut field: FieldSpec = serde_json::from_value(value).unwrap();
        field.key = "f".into();
        field
    }

    fn ts(value: serde_json::Value) -> String {
        map_field_type(&field(value))
    }

    #[test]
    fn type_names() {
        assert_eq!(to_type_name("product_category"), "ProductCategory");
        assert_eq!(to_type_name("contact"), "Contact");
        assert_eq!(to_type_name("event type"), "EventType");
        assert_eq!(to_type_name("product-tag"), "ProductTag");
    }

    #[test]
    fn scalar_types() {
        assert_eq!(ts(json!({"type": "textarea"})), "string");
        assert_eq!(ts(json!({"type": "date_time_picker"})), "string");
        assert_eq!(ts(json!({"type": "number"})), "number");
        assert_eq!(ts(json!({"type": "true_false"})), "boolean");
        assert_eq!(
            ts(json!({"type": "google_map"})),
            "{lat: number; lng: number; address?: string}"
        );
    }

    #[test]
    fn choice_types() {
        let choices = json!({"a": "A", "b": "B"});
        assert_eq!(ts(json!({"type": "select", "choices": choices})), "'a' | 'b'");
        assert_eq!(
            ts(json!({"type": "select", "choices": choices, "multiple": true})),
            "Array<'a' | 'b'>"
        );
        assert_eq!(ts(json!({"type": "select"})), "string");
        assert_eq!(ts(json!({"type": "select", "multiple": 1})), "string[]");
        assert_eq!(
            ts(json!({"type": "checkbox", "choices": ["x", "y"]})),
            "Array<'x' | 'y'>"
        );
        assert_eq!(ts(json!({"type": "checkbox"})), "string[]");
        assert_eq!(ts(json!({"type": "radio", "choices": {"on": "On"}})), "'on'");
        assert_eq!(ts(json!({"type": "radio"})), "string");
    }

    #[test]
    fn media_types() {
        assert_eq!(ts(json!({"type": "image"})), "WPImage");
        assert_eq!(ts(json!({"type": "image", "return_format": "url"})), "string");
        assert_eq!(ts(json!({"type": "file", "return_format": "id"})), "number");
        assert_eq!(ts(json!({"type": "file"})), "WPFile");
        assert_eq!(ts(json!({"type": "gallery"})), "WPImage[]");
        assert_eq!(ts(json!({"type": "link", "return_format": "url"})), "string");
        assert_eq!(
            ts(json!({"type": "link"})),
            "{url: string; title: string; target: string}"
        );
    }

    #[test]
    fn relational_types() {
        assert_eq!(
            ts(json!({"type": "post_object", "post_type": ["product"]})),
            "Product"
        );
        assert_eq!(
            ts(json!({"type": "post_object", "post_type": "product", "multiple": true})),
            "Product[]"
        );
        assert_eq!(
            ts(json!({"type": "post_object", "post_type": ["a", "b"]})),
            "WPPost"
        );
        assert_eq!(ts(json!({"type": "post_object"})), "WPPost");
        assert_eq!(
            ts(json!({"type": "post_object", "return_format": "id"})),
            "number"
        );
        assert_eq!(
            ts(json!({"type": "relationship", "post_type": ["product"]})),
            "Product"
        );
        assert_eq!(
            ts(json!({"type": "relationship", "post_type": ["product"], "multiple": true})),
            "Product[]"
        );
        assert_eq!(
            ts(json!({"type": "relationship", "return_format": "id"})),
            "number"
        );
        assert_eq!(
            ts(json!({"type": "relationship", "return_format": "id", "multiple": 1})),
            "number[]"
        );
        assert_eq!(ts(json!({"type": "taxonomy"})), "number[]");
        assert_eq!(
            ts(json!({"type": "taxonomy", "field_type": "select", "return_format": "object"})),
            "WPTerm"
        );
        assert_eq!(ts(json!({"type": "user"})), "WPUser");
        assert_eq!(ts(json!({"type": "user", "multiple": true})), "WPUser[]");
        assert_eq!(ts(json!({"type": "user", "return_format": "id"})), "number");
    }

    #[test]
    fn composite_types() {
        assert_eq!(
            ts(json!({
                "type": "repeater",
                "sub_fields": {
                    "spec_name": {"type": "text"},
                    "spec_value": {"type": "text"}
                }
            })),
            "{spec_name?: string; spec_value?: string}[]"
        );
        assert_eq!(ts(json!({"type": "repeater"})), "any[]");
        assert_eq!(
            ts(json!({
                "type": "group",
                "sub_fields": {"width": {"type": "number", "required": true}}
            })),
            "{width: number}"
        );
        assert_eq!(ts(json!({"type": "group"})), "Record<string, any>");
    }

    #[test]
    fn flexible_content_is_a_tagged_union() {
        insta::assert_snapshot!(
            ts(json!({
                "type": "flexible_content",
                "layouts": {
                    "hero": {"sub_fields": {"heading": {"type": "text", "required": true}}},
                    "quote": {}
                }
            })),
            @"Array<{acf_fc_layout: 'hero'; heading: string} | {acf_fc_layout: 'quote'}>"
        );
        assert_eq!(ts(json!({"type": "flexible_content"})), "any[]");
    }

    #[test]
    fn unknown_and_missing_types_are_any() {
        assert_eq!(ts(json!({"type": "colour"})), "any");
        assert_eq!(ts(json!({})), "any");
    }

    fn contact() -> SchemaDocument {
        parse_str(
            r#"
post_type: contact
label: Contacts
supports: [title, editor]
fields:
  contact_name:
    type: text
    label: Full Name
    instructions: "First and last\nas on the badge"
    required: true
  contact_email:
    type: email
"#,
            Format::Yaml,
            None,
        )
        .unwrap()
    }

    #[test]
    fn post_type_unit() {
        let out = emit(&contact());

        assert!(out.starts_with(
            "/**\n * Generated TypeScript types for Contacts\n * @generated from schema: contact.yaml\n */\n\n"
        ));
        assert!(out.contains(
            "export interface ContactACF {\n  /** Full Name\n   * First and last\n   * as on the badge\n   */\n  contact_name: string;\n  contact_email?: string;\n}\n"
        ));
        assert!(out.contains("export interface Contact {\n"));
        assert!(out.contains("  type: 'contact';\n"));
        assert!(out.contains("  content: {\n    rendered: string;\n    protected: boolean;\n  };\n"));
        assert!(!out.contains("  excerpt: {"));
        assert!(!out.contains("featured_media"));
        assert!(out.contains("  acf: ContactACF;\n"));
        assert!(out.contains("export type ContactResponse = Contact;\n"));
        assert!(out.contains("export type ContactListResponse = Contact[];\n"));
        assert!(out.contains("  content?: string;\n"));
        assert!(out.contains("  acf?: Partial<ContactACF>;\n"));
        assert!(out.contains("export type ContactUpdateRequest = Partial<ContactCreateRequest>;\n"));
        assert!(out.ends_with(HELPER_TYPES));
    }

    #[test]
    fn emission_is_deterministic() {
        let doc = contact();
        assert_eq!(emit(&doc), emit(&doc));
    }

    #[test]
    fn taxonomy_unit() {
        let doc = parse_str(
            "taxonomy: product_category\nlabel: Product Categories\nhierarchical: true\n",
            Format::Yaml,
            None,
        )
        .unwrap();
        let out = emit(&doc);

        assert!(out.contains("export interface ProductCategoryACF {\n}\n"));
        assert!(out.contains("// WordPress Term Interface\nexport interface ProductCategory {\n"));
        assert!(out.contains("  taxonomy: 'product_category';\n"));
        assert!(out.contains("  parent: number;\n"));
        assert!(out.contains("  name: string;\n  description?: string;\n  slug?: string;\n  parent?: number;\n"));
    }

    #[test]
    fn index_unit() {
        assert_eq!(
            emit_index(["contact", "product"]),
            "/**\n * Generated TypeScript types index\n * @generated\n */\n\n\
             export * from './contact';\n\
             export * from './product';\n"
        );
    }
}
