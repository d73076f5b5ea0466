//! `ignis register` and `ignis flush`
//!
//! Without a host to register into, registration is previewed: everything a
//! registrar would receive is collected and printed as one JSON document.

use super::{Context, Kind};
use clap::Args;
use ignis_schema::field_group::FieldGroup;
use ignis_schema::{
    ContentRegistrar, FieldGroupSink, PostTypeArgs, TaxonomyArgs, register_all, register_one,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Args)]
pub struct RegisterArgs {
    /// Register only this schema
    #[arg(long)]
    pub slug: Option<String>,

    /// Kind of the schema named by --slug
    #[arg(long, value_enum, default_value = "post-type")]
    pub kind: Kind,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyRegistration {
    pub object_type: Vec<String>,
    pub args: TaxonomyArgs,
}

/// A registrar that records every call.
#[derive(Debug, Default, Serialize)]
pub struct JsonRegistrar {
    pub post_types: BTreeMap<String, PostTypeArgs>,
    pub taxonomies: BTreeMap<String, TaxonomyRegistration>,
    pub field_groups: Vec<FieldGroup>,
}

impl FieldGroupSink for JsonRegistrar {
    fn add_field_group(&mut self, group: &FieldGroup) {
        self.field_groups.push(group.clone());
    }
}

impl ContentRegistrar for JsonRegistrar {
    fn register_post_type(&mut self, slug: &str, args: &PostTypeArgs) {
        self.post_types.insert(slug.to_string(), args.clone());
    }

    fn register_taxonomy(&mut self, slug: &str, post_types: &[String], args: &TaxonomyArgs) {
        self.taxonomies.insert(
            slug.to_string(),
            TaxonomyRegistration {
                object_type: post_types.to_vec(),
                args: args.clone(),
            },
        );
    }

    fn flush_rewrite_rules(&mut self) {
        println!("Rewrite rules flushed");
    }
}

pub fn run(args: RegisterArgs, ctx: &Context) -> i32 {
    let repository = match ctx.repository() {
        Ok(repository) => repository,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };

    let mut registrar = JsonRegistrar::default();
    let summary = match &args.slug {
        Some(slug) => match register_one(&repository, args.kind.into(), slug, &mut registrar) {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("{}: {}", slug, e);
                return 1;
            }
        },
        None => register_all(&repository, &mut registrar),
    };

    match serde_json::to_string_pretty(&registrar) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    }

    for slug in registrar.post_types.keys().chain(registrar.taxonomies.keys()) {
        eprintln!("Registered: {}", slug);
    }
    eprintln!(
        "Registered {} post type(s) and {} taxonomy(ies) with {} field group(s)",
        summary.post_types, summary.taxonomies, summary.field_groups
    );
    0
}

pub fn flush() -> i32 {
    let mut registrar = JsonRegistrar::default();
    registrar.flush_rewrite_rules();
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ignis_schema::{PostTypeSchema, SchemaDocument, SchemaRepository, SchemaSet};

    #[test]
    fn records_registrations_as_json() {
        let mut post_types = SchemaSet::new();
        post_types.insert(
            "book".to_string(),
            SchemaDocument::from(PostTypeSchema::new("book", "Books")),
        );
        let repository = SchemaRepository::from_sets(post_types, SchemaSet::new());

        let mut registrar = JsonRegistrar::default();
        let summary = register_all(&repository, &mut registrar);
        assert_eq!(summary.post_types, 1);
        assert_eq!(summary.field_groups, 0);

        let json = serde_json::to_value(&registrar).unwrap();
        assert_eq!(json["post_types"]["book"]["labels"]["name"], "Books");
        assert_eq!(json["post_types"]["book"]["has_archive"], true);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
