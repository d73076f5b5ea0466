//! `ignis create <slug> --prompt TEXT`

use super::{Context, Kind};
use clap::Args;
use ignis_schema::input::find_schema_file;
use ignis_schema::{
    FieldSpec, SchemaDocument, SchemaKind, sanitize_post_type_slug, scaffold_field,
    scaffold_post_type, scaffold_taxonomy, validate,
};
use tracing::info;

#[derive(Args)]
pub struct CreateArgs {
    /// Slug of the new schema
    pub slug: String,

    /// Description of the content type, stored as the schema's description
    #[arg(long)]
    pub prompt: Option<String>,

    #[arg(long, value_enum, default_value = "post-type")]
    pub kind: Kind,

    /// Add a text field with this label (repeatable)
    #[arg(long = "field", value_name = "LABEL")]
    pub fields: Vec<String>,

    /// Replace an existing schema file
    #[arg(long)]
    pub overwrite: bool,
}

pub fn run(args: CreateArgs, ctx: &Context) -> i32 {
    let Some(prompt) = args.prompt.filter(|p| !p.trim().is_empty()) else {
        eprintln!("Please provide a --prompt with the schema description");
        return 1;
    };

    let mut extra = Vec::new();
    for label in &args.fields {
        match scaffold_field(label) {
            Some(field) => extra.push(field),
            None => {
                eprintln!("Field label '{}' does not yield a usable key", label);
                return 1;
            }
        }
    }

    let kind: SchemaKind = args.kind.into();
    let (slug, doc) = match kind {
        SchemaKind::PostType => {
            let slug = sanitize_post_type_slug(&args.slug);
            let mut schema = scaffold_post_type(&slug, &prompt);
            add_fields(&mut schema.fields, extra);
            (slug, SchemaDocument::from(schema))
        }
        SchemaKind::Taxonomy => {
            let mut schema = scaffold_taxonomy(&args.slug, &prompt);
            add_fields(&mut schema.fields, extra);
            (args.slug.clone(), SchemaDocument::from(schema))
        }
    };
    if slug != args.slug {
        info!("using slug {} for {}", slug, args.slug);
    }

    let errors = validate(&doc);
    if !errors.is_empty() {
        eprintln!("{}: invalid slug", args.slug);
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return 1;
    }

    let dir = ctx.schema_dir(kind);
    if !args.overwrite && find_schema_file(dir, &slug).is_ok() {
        eprintln!("Schema already exists. Use --overwrite to replace it.");
        return 1;
    }

    let yaml = match serde_yaml::to_string(&doc) {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("{}: {}", slug, e);
            return 1;
        }
    };
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Failed to create {}: {}", dir.display(), e);
        return 1;
    }
    let path = dir.join(format!("{}.yaml", slug));
    if let Err(e) = std::fs::write(&path, yaml) {
        eprintln!("Failed to write {}: {}", path.display(), e);
        return 1;
    }

    println!("Schema created: {}", path.display());
    0
}

/// Append `extra`, replacing any template field with the same key.
fn add_fields(fields: &mut Vec<FieldSpec>, extra: Vec<FieldSpec>) {
    for field in extra {
        match fields.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => *existing = field,
            None => fields.push(field),
        }
    }
}
