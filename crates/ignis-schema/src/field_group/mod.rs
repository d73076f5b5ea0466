//! Field-group compilation.
//!
//! Lowers a schema's field tree into the field-group description consumed by
//! the host's custom-fields runtime. Post types and taxonomies share the
//! recursive field compiler; only the group envelope differs.
//!
//! Every compiled field is fully populated: options the schema leaves out
//! are filled from [`defaults::type_defaults`].

pub mod defaults;

use crate::schema::{Condition, FieldSpec, FieldType, Layout, SchemaDocument, humanize};
use crate::traits::FieldGroupSink;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

/// A compiled field group, ready for registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGroup {
    pub key: String,
    pub title: String,
    pub fields: Vec<CompiledField>,
    pub location: Vec<Vec<LocationRule>>,
    pub menu_order: i64,
    pub position: String,
    pub style: String,
    pub label_placement: String,
    pub instruction_placement: String,
    pub hide_on_screen: String,
    pub active: bool,
    pub description: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_in_rest: bool,
}

/// "Show this group where `param` `operator` `value`".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRule {
    pub param: String,
    pub operator: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledField {
    pub key: String,
    pub label: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub instructions: String,
    pub required: bool,
    /// Serialized as `0` when the field is unconditional.
    #[serde(serialize_with = "logic_or_zero")]
    pub conditional_logic: Option<Vec<Vec<CompiledCondition>>>,
    pub wrapper: Wrapper,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Type-specific options, defaults filled in.
    #[serde(flatten)]
    pub settings: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_fields: Option<Vec<CompiledField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layouts: Option<Vec<CompiledLayout>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_in_rest: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wrapper {
    pub width: String,
    pub class: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledCondition {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledLayout {
    pub key: String,
    pub name: String,
    pub label: String,
    pub display: String,
    pub sub_fields: Vec<CompiledField>,
    pub min: Value,
    pub max: Value,
}

impl CompiledField {
    pub fn setting(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }
}

fn logic_or_zero<S>(
    logic: &Option<Vec<Vec<CompiledCondition>>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match logic {
        Some(groups) => groups.serialize(serializer),
        None => serializer.serialize_u8(0),
    }
}

/// Compile the field group for a document, keyed by its declared slug.
pub fn generate_field_group(doc: &SchemaDocument) -> FieldGroup {
    generate_field_group_as(doc.slug().unwrap_or_default(), doc)
}

/// Compile the field group for a document registered under `slug`.
pub fn generate_field_group_as(slug: &str, doc: &SchemaDocument) -> FieldGroup {
    let label = doc
        .label()
        .map(String::from)
        .unwrap_or_else(|| humanize(slug));

    let (key, title, param) = match doc {
        SchemaDocument::PostType(_) => (
            format!("group_{}", slug),
            format!("{} Fields", label),
            "post_type",
        ),
        SchemaDocument::Taxonomy(_) => (
            format!("group_taxonomy_{}", slug),
            format!("{} Term Fields", label),
            "taxonomy",
        ),
    };

    let fields = doc
        .fields()
        .iter()
        .map(|field| generate_field(field, slug))
        .collect();

    FieldGroup {
        key,
        title,
        fields,
        location: vec![vec![LocationRule {
            param: param.to_string(),
            operator: "==".to_string(),
            value: slug.to_string(),
        }]],
        menu_order: 0,
        position: "normal".to_string(),
        style: "default".to_string(),
        label_placement: "top".to_string(),
        instruction_placement: "label".to_string(),
        hide_on_screen: String::new(),
        active: true,
        description: doc.description().unwrap_or_default().to_string(),
        show_in_rest: doc.rest_enabled(),
    }
}

/// Compile one field (and everything nested under it) within `scope`.
///
/// The compiled key is `field_<scope>_<key>`; nested fields use their
/// parent's compiled key as scope, so equal local keys under different
/// parents never collide.
pub fn generate_field(field: &FieldSpec, scope: &str) -> CompiledField {
    let key = format!("field_{}_{}", scope, field.key);

    // A missing type compiles as text; an unknown one passes through bare.
    let raw = field.type_name.as_deref().filter(|t| !t.is_empty());
    let effective = match (raw, field.field_type()) {
        (_, Some(t)) => Some(t),
        (Some(_), None) => None,
        (None, None) => Some(FieldType::Text),
    };
    let type_name = effective
        .map(|t| t.as_str())
        .or(raw)
        .unwrap_or_default()
        .to_string();
    debug!("compiling field {} ({})", key, type_name);

    let mut compiled = CompiledField {
        label: field.label_or_default(),
        name: field.key.clone(),
        field_type: type_name,
        instructions: field.instructions.clone().unwrap_or_default(),
        required: field.required,
        conditional_logic: compile_conditions(field, scope),
        wrapper: wrapper(field),
        default_value: field.default_value.clone().filter(|v| !v.is_null()),
        placeholder: field.placeholder.clone().filter(|p| !p.is_empty()),
        settings: Map::new(),
        sub_fields: None,
        layouts: None,
        show_in_rest: field.option_flag("show_in_rest"),
        key,
    };

    if let Some(t) = effective {
        for (name, default) in defaults::type_defaults(t) {
            let value = field.option(name).cloned().unwrap_or(default);
            compiled.settings.insert(name.to_string(), value);
        }

        match t {
            FieldType::Repeater | FieldType::Group => {
                compiled.sub_fields = Some(
                    field
                        .sub_fields
                        .iter()
                        .map(|sub| generate_field(sub, &compiled.key))
                        .collect(),
                );
            }
            FieldType::FlexibleContent => {
                compiled.layouts = Some(
                    field
                        .layouts
                        .iter()
                        .map(|layout| generate_layout(layout, &compiled.key))
                        .collect(),
                );
            }
            _ => {}
        }
    }

    compiled
}

fn generate_layout(layout: &Layout, field_key: &str) -> CompiledLayout {
    let key = format!("layout_{}_{}", field_key, layout.key);
    let sub_fields = layout
        .sub_fields
        .iter()
        .map(|sub| generate_field(sub, &key))
        .collect();
    let bound = |v: &Option<Value>| {
        v.clone()
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| Value::String(String::new()))
    };

    CompiledLayout {
        name: layout.key.clone(),
        label: layout.label_or_default(),
        display: layout
            .display
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "block".to_string()),
        sub_fields,
        min: bound(&layout.min),
        max: bound(&layout.max),
        key,
    }
}

fn compile_conditions(field: &FieldSpec, scope: &str) -> Option<Vec<Vec<CompiledCondition>>> {
    let logic = field.conditions()?;
    Some(
        logic
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|Condition { field, operator, value }| CompiledCondition {
                        field: format!("field_{}_{}", scope, field),
                        operator: operator.clone(),
                        value: value.clone(),
                    })
                    .collect()
            })
            .collect(),
    )
}

fn wrapper(field: &FieldSpec) -> Wrapper {
    let mut wrapper = Wrapper::default();
    if let Some(Value::Object(declared)) = field.option("wrapper") {
        let text = |name: &str| match declared.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        if let Some(width) = text("width") {
            wrapper.width = width;
        }
        if let Some(class) = text("class") {
            wrapper.class = class;
        }
        if let Some(id) = text("id") {
            wrapper.id = id;
        }
    }
    wrapper
}

/// Hand `group` to `sink`; does nothing when no runtime is available.
pub fn register(group: &FieldGroup, sink: Option<&mut dyn FieldGroupSink>) {
    match sink {
        Some(sink) => sink.add_field_group(group),
        None => debug!("no field-group runtime; skipping {}", group.key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Format, parse_str};
    use serde_json::json;

    fn doc(yaml: &str) -> SchemaDocument {
        parse_str(yaml, Format::Yaml, None).unwrap()
    }

    #[test]
    fn post_type_envelope() {
        let group = generate_field_group(&doc(
            "post_type: product\nlabel: Products\ndescription: Shop items\nfields:\n  price:\n    type: number\n    label: Price\n",
        ));

        assert_eq!(group.key, "group_product");
        assert_eq!(group.title, "Products Fields");
        assert_eq!(group.location[0][0].param, "post_type");
        assert_eq!(group.location[0][0].value, "product");
        assert_eq!(group.description, "Shop items");
        assert!(group.show_in_rest);
        assert_eq!(group.fields.len(), 1);
        assert_eq!(group.fields[0].key, "field_product_price");
    }

    #[test]
    fn taxonomy_envelope() {
        let group = generate_field_group(&doc(
            "taxonomy: genre\nlabel: Genres\nshow_in_rest: false\nfields:\n  color:\n    type: color_picker\n    label: Color\n",
        ));

        assert_eq!(group.key, "group_taxonomy_genre");
        assert_eq!(group.title, "Genres Term Fields");
        assert_eq!(group.location[0][0].param, "taxonomy");
        assert!(!group.show_in_rest);
        assert_eq!(group.fields[0].key, "field_genre_color");
    }

    #[test]
    fn overrides_replace_defaults() {
        let field = FieldSpec::new("notes", FieldType::Textarea)
            .with_label("Notes")
            .with_option("rows", json!(8));
        let compiled = generate_field(&field, "product");

        assert_eq!(compiled.setting("rows"), Some(&json!(8)));
        assert_eq!(compiled.setting("new_lines"), Some(&json!("")));
        assert_eq!(compiled.setting("readonly"), Some(&json!(false)));
    }

    #[test]
    fn every_type_is_fully_populated() {
        for ty in FieldType::ALL {
            let compiled = generate_field(&FieldSpec::new("f", ty), "s");
            for (name, default) in defaults::type_defaults(ty) {
                assert_eq!(compiled.setting(name), Some(&default), "{}.{}", ty, name);
            }
        }
    }

    #[test]
    fn nested_keys_are_scoped_by_parent() {
        let group = generate_field_group(&doc(
            r#"
post_type: product
label: Products
fields:
  specs:
    type: repeater
    label: Specs
    sub_fields:
      spec_name: {type: text, label: Name}
  blocks:
    type: flexible_content
    label: Blocks
    layouts:
      hero:
        sub_fields:
          heading: {type: text, label: Heading}
"#,
        ));

        let specs = &group.fields[0];
        let subs = specs.sub_fields.as_ref().unwrap();
        assert_eq!(subs[0].key, "field_field_product_specs_spec_name");
        assert_eq!(specs.setting("layout"), Some(&json!("table")));

        let layouts = group.fields[1].layouts.as_ref().unwrap();
        assert_eq!(layouts[0].key, "layout_field_product_blocks_hero");
        assert_eq!(layouts[0].label, "Hero");
        assert_eq!(layouts[0].display, "block");
        assert_eq!(
            layouts[0].sub_fields[0].key,
            "field_layout_field_product_blocks_hero_heading"
        );
    }

    #[test]
    fn conditional_logic_is_rooted_at_scope() {
        let field: FieldSpec = serde_json::from_value(json!({
            "type": "number",
            "label": "Sale price",
            "conditional_logic": [[{"field": "on_sale", "value": 1}]]
        }))
        .unwrap();
        let compiled = generate_field(&field, "product");
        let logic = compiled.conditional_logic.as_ref().unwrap();
        assert_eq!(logic[0][0].field, "field_product_on_sale");
        assert_eq!(logic[0][0].operator, "==");

        let plain = generate_field(&FieldSpec::new("x", FieldType::Text), "product");
        let value = serde_json::to_value(&plain).unwrap();
        assert_eq!(value["conditional_logic"], json!(0));
    }

    #[test]
    fn missing_type_compiles_as_text_and_label_is_derived() {
        let mut field: FieldSpec = serde_json::from_value(json!({})).unwrap();
        field.key = "contact_name".into();
        let compiled = generate_field(&field, "contact");
        assert_eq!(compiled.field_type, "text");
        assert_eq!(compiled.label, "Contact Name");
        assert_eq!(compiled.setting("maxlength"), Some(&json!("")));
    }

    #[test]
    fn serialized_shape() {
        let field = FieldSpec::new("email", FieldType::Email)
            .with_label("Email")
            .with_required(true)
            .with_option("wrapper", json!({"width": "50"}));
        let value = serde_json::to_value(generate_field(&field, "contact")).unwrap();

        assert_eq!(
            value,
            json!({
                "key": "field_contact_email",
                "label": "Email",
                "name": "email",
                "type": "email",
                "instructions": "",
                "required": true,
                "conditional_logic": 0,
                "wrapper": {"width": "50", "class": "", "id": ""},
                "prepend": "",
                "append": ""
            })
        );
    }

    struct Collect(Vec<String>);

    impl FieldGroupSink for Collect {
        fn add_field_group(&mut self, group: &FieldGroup) {
            self.0.push(group.key.clone());
        }
    }

    #[test]
    fn register_without_runtime_is_a_no_op() {
        let group = generate_field_group(&doc("post_type: a\nlabel: A\n"));
        register(&group, None);

        let mut sink = Collect(Vec::new());
        register(&group, Some(&mut sink));
        assert_eq!(sink.0, vec!["group_a"]);
    }
}
