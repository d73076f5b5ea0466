//! `ignis info <slug>`

use super::{Context, Kind, print_table, yes_no};
use clap::{Args, ValueEnum};
use ignis_schema::{SchemaDocument, SchemaKind};

#[derive(Clone, Copy, ValueEnum)]
pub enum InfoFormat {
    /// Human-readable summary
    Table,
    Json,
    Yaml,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Schema slug
    pub slug: String,

    #[arg(long, value_enum, default_value = "post-type")]
    pub kind: Kind,

    #[arg(short, long, value_enum, default_value = "table")]
    pub format: InfoFormat,
}

pub fn run(args: InfoArgs, ctx: &Context) -> i32 {
    let doc = match ctx.load_schema(args.kind.into(), &args.slug) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}: {}", args.slug, e);
            return 1;
        }
    };

    let rendered = match args.format {
        InfoFormat::Table => {
            print_summary(&args.slug, &doc);
            return 0;
        }
        InfoFormat::Json => serde_json::to_string_pretty(&doc)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
        InfoFormat::Yaml => serde_yaml::to_string(&doc).map_err(|e| e.to_string()),
    };

    match rendered {
        Ok(text) => {
            print!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("{}: {}", args.slug, e);
            1
        }
    }
}

fn print_summary(slug: &str, doc: &SchemaDocument) {
    println!("Schema: {}", doc.label().unwrap_or(slug));
    match doc.kind() {
        SchemaKind::PostType => println!("Post Type: {}", doc.slug().unwrap_or(slug)),
        SchemaKind::Taxonomy => println!("Taxonomy: {}", doc.slug().unwrap_or(slug)),
    }
    println!("Description: {}", doc.description().unwrap_or("N/A"));
    println!(
        "REST API: {}",
        if doc.rest_enabled() { "Enabled" } else { "Disabled" }
    );

    let (heading, related) = match doc {
        SchemaDocument::PostType(schema) => ("Taxonomies", &schema.taxonomies),
        SchemaDocument::Taxonomy(schema) => ("Post Types", &schema.post_types),
    };
    if !related.is_empty() {
        println!("{}: {}", heading, related.join(", "));
    }

    if doc.fields().is_empty() {
        return;
    }
    println!();
    println!("Fields:");
    let rows: Vec<Vec<String>> = doc
        .fields()
        .iter()
        .map(|field| {
            vec![
                field.key.clone(),
                field.label_or_default(),
                field.type_name.clone().unwrap_or_else(|| "text".to_string()),
                yes_no(field.required).to_string(),
            ]
        })
        .collect();
    print_table(&["Key", "Label", "Type", "Required"], &rows);
}
