//! Registration arguments for the host's content-type APIs.
//!
//! Schemas are translated into the argument sets the host expects, with the
//! host's documented defaults filled in, and handed to a
//! [`ContentRegistrar`].

use crate::field_group::generate_field_group_as;
use crate::input::LoadError;
use crate::relations::RelationMap;
use crate::repository::SchemaRepository;
use crate::schema::{
    PostTypeSchema, Rewrite, SchemaDocument, SchemaKind, TaxonomySchema, humanize, non_empty,
};
use crate::traits::ContentRegistrar;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

pub type Labels = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostTypeArgs {
    pub labels: Labels,
    pub public: bool,
    pub show_in_rest: bool,
    pub supports: Vec<String>,
    pub hierarchical: bool,
    pub has_archive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<Rewrite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_controller_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyArgs {
    pub labels: Labels,
    pub public: bool,
    pub show_in_rest: bool,
    pub hierarchical: bool,
    pub show_admin_column: bool,
    pub query_var: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_ui: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_menu: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_nav_menus: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_tagcloud: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<Rewrite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_controller_class: Option<String>,
}

/// Plural and singular display names, falling back to the humanized slug.
fn names(slug: Option<&str>, label: Option<&str>, singular: Option<&str>) -> (String, String) {
    let plural = non_empty(label)
        .map(String::from)
        .unwrap_or_else(|| humanize(slug.unwrap_or_default()));
    let singular = non_empty(singular)
        .map(String::from)
        .unwrap_or_else(|| plural.clone());
    (plural, singular)
}

/// `false` switches rewriting off, which the host expresses by omission.
fn effective_rewrite(rewrite: &Option<Rewrite>) -> Option<Rewrite> {
    rewrite
        .clone()
        .filter(|r| !matches!(r, Rewrite::Toggle(false)))
}

pub fn post_type_args(schema: &PostTypeSchema) -> PostTypeArgs {
    let (plural, singular) = names(
        schema.slug.as_deref(),
        schema.label.as_deref(),
        schema.singular_label.as_deref(),
    );
    let plural_lower = plural.to_lowercase();
    let singular_lower = singular.to_lowercase();

    let labels: Labels = [
        ("name", plural.clone()),
        ("singular_name", singular.clone()),
        ("add_new", "Add New".to_string()),
        ("add_new_item", format!("Add New {}", singular)),
        ("edit_item", format!("Edit {}", singular)),
        ("new_item", format!("New {}", singular)),
        ("view_item", format!("View {}", singular)),
        ("view_items", format!("View {}", plural)),
        ("search_items", format!("Search {}", plural)),
        ("not_found", format!("No {} found", plural_lower)),
        ("not_found_in_trash", format!("No {} found in Trash", plural_lower)),
        ("all_items", format!("All {}", plural)),
        ("archives", format!("{} Archives", singular)),
        ("attributes", format!("{} Attributes", singular)),
        ("insert_into_item", format!("Insert into {}", singular_lower)),
        ("uploaded_to_this_item", format!("Uploaded to this {}", singular_lower)),
    ]
    .into_iter()
    .collect();

    let rest = schema.rest_api.as_ref();
    PostTypeArgs {
        labels,
        public: schema.public.unwrap_or(true),
        show_in_rest: schema.show_in_rest.unwrap_or(true),
        supports: schema.supports.clone().unwrap_or_else(|| {
            ["title", "editor", "thumbnail"]
                .into_iter()
                .map(String::from)
                .collect()
        }),
        hierarchical: schema.hierarchical.unwrap_or(false),
        has_archive: schema.has_archive.unwrap_or(true),
        description: non_empty(schema.description.as_deref()).map(String::from),
        menu_icon: non_empty(schema.menu_icon.as_deref()).map(String::from),
        rewrite: effective_rewrite(&schema.rewrite),
        rest_base: rest.and_then(|r| non_empty(r.base.as_deref())).map(String::from),
        rest_controller_class: rest
            .and_then(|r| non_empty(r.controller.as_deref()))
            .map(String::from),
    }
}

pub fn taxonomy_args(schema: &TaxonomySchema) -> TaxonomyArgs {
    let (plural, singular) = names(
        schema.slug.as_deref(),
        schema.label.as_deref(),
        schema.singular_label.as_deref(),
    );
    let plural_lower = plural.to_lowercase();
    let hierarchical = schema.is_hierarchical();

    let mut labels: Labels = [
        ("name", plural.clone()),
        ("singular_name", singular.clone()),
        ("search_items", format!("Search {}", plural)),
        ("all_items", format!("All {}", plural)),
        ("edit_item", format!("Edit {}", singular)),
        ("update_item", format!("Update {}", singular)),
        ("add_new_item", format!("Add New {}", singular)),
        ("new_item_name", format!("New {} Name", singular)),
        ("menu_name", plural.clone()),
    ]
    .into_iter()
    .collect();

    if hierarchical {
        labels.insert("parent_item", format!("Parent {}", singular));
        labels.insert("parent_item_colon", format!("Parent {}:", singular));
    } else {
        labels.insert("popular_items", format!("Popular {}", plural));
        labels.insert(
            "separate_items_with_commas",
            format!("Separate {} with commas", plural_lower),
        );
        labels.insert(
            "add_or_remove_items",
            format!("Add or remove {}", plural_lower),
        );
        labels.insert(
            "choose_from_most_used",
            format!("Choose from the most used {}", plural_lower),
        );
        labels.insert("not_found", format!("No {} found", plural_lower));
    }

    let rest = schema.rest_api.as_ref();
    TaxonomyArgs {
        labels,
        public: schema.public.unwrap_or(true),
        show_in_rest: schema.show_in_rest.unwrap_or(true),
        hierarchical,
        show_admin_column: schema.show_admin_column.unwrap_or(true),
        query_var: schema.query_var.unwrap_or(true),
        description: non_empty(schema.description.as_deref()).map(String::from),
        show_ui: schema.show_ui,
        show_in_menu: schema.show_in_menu,
        show_in_nav_menus: schema.show_in_nav_menus,
        show_tagcloud: schema.show_tagcloud,
        rewrite: effective_rewrite(&schema.rewrite),
        capabilities: schema.capabilities.clone(),
        rest_base: rest.and_then(|r| non_empty(r.base.as_deref())).map(String::from),
        rest_controller_class: rest
            .and_then(|r| non_empty(r.controller.as_deref()))
            .map(String::from),
    }
}

/// Counts of what a registration pass handed to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationSummary {
    pub post_types: usize,
    pub taxonomies: usize,
    pub field_groups: usize,
}

/// Register every loaded schema: post types, then taxonomies with their
/// resolved post types, then a field group for each schema that has fields.
pub fn register_all(
    repository: &SchemaRepository,
    registrar: &mut dyn ContentRegistrar,
) -> RegistrationSummary {
    let mut summary = RegistrationSummary::default();
    let relations = repository.relations();

    for (slug, doc) in repository.post_types() {
        if let SchemaDocument::PostType(schema) = doc {
            registrar.register_post_type(slug, &post_type_args(schema));
            summary.post_types += 1;
        }
    }

    for (slug, doc) in repository.taxonomies() {
        if let SchemaDocument::Taxonomy(schema) = doc {
            register_taxonomy(registrar, slug, schema, &relations);
            summary.taxonomies += 1;
        }
    }

    for (slug, doc) in repository.post_types().iter().chain(repository.taxonomies()) {
        if register_field_group(registrar, slug, doc) {
            summary.field_groups += 1;
        }
    }

    debug!(
        "registered {} post types, {} taxonomies, {} field groups",
        summary.post_types, summary.taxonomies, summary.field_groups
    );
    summary
}

/// Register a single schema and its field group.
pub fn register_one(
    repository: &SchemaRepository,
    kind: SchemaKind,
    slug: &str,
    registrar: &mut dyn ContentRegistrar,
) -> Result<RegistrationSummary, LoadError> {
    let doc = repository.get(kind, slug)?;
    let mut summary = RegistrationSummary::default();

    match doc {
        SchemaDocument::PostType(schema) => {
            registrar.register_post_type(slug, &post_type_args(schema));
            summary.post_types = 1;
        }
        SchemaDocument::Taxonomy(schema) => {
            register_taxonomy(registrar, slug, schema, &repository.relations());
            summary.taxonomies = 1;
        }
    }
    if register_field_group(registrar, slug, doc) {
        summary.field_groups = 1;
    }
    Ok(summary)
}

fn register_taxonomy(
    registrar: &mut dyn ContentRegistrar,
    slug: &str,
    schema: &TaxonomySchema,
    relations: &RelationMap,
) {
    let post_types: Vec<String> = relations
        .get(slug)
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default();
    registrar.register_taxonomy(slug, &post_types, &taxonomy_args(schema));
}

fn register_field_group(
    registrar: &mut dyn ContentRegistrar,
    slug: &str,
    doc: &SchemaDocument,
) -> bool {
    if doc.fields().is_empty() {
        return false;
    }
    registrar.add_field_group(&generate_field_group_as(slug, doc));
    true
}
