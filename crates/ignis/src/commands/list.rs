//! `ignis list`

use super::{Context, KindFilter, print_table, yes_no};
use clap::Args;
use ignis_schema::SchemaKind;

#[derive(Args)]
pub struct ListArgs {
    /// Which schemas to list
    #[arg(long, value_enum, default_value = "all")]
    pub kind: KindFilter,
}

pub fn run(args: ListArgs, ctx: &Context) -> i32 {
    let mut printed = false;

    for &kind in args.kind.kinds() {
        let schemas = match ctx.load_schemas(kind) {
            Ok(schemas) => schemas,
            Err(e) => {
                eprintln!("error: {}", e);
                return 1;
            }
        };
        if schemas.is_empty() {
            eprintln!("No schemas found in {}", ctx.schema_dir(kind).display());
            continue;
        }

        let rows: Vec<Vec<String>> = schemas
            .iter()
            .map(|(slug, doc)| {
                vec![
                    slug.clone(),
                    doc.label().unwrap_or_default().to_string(),
                    doc.fields().len().to_string(),
                    yes_no(doc.rest_enabled()).to_string(),
                ]
            })
            .collect();

        if printed {
            println!();
        }
        let heading = match kind {
            SchemaKind::PostType => "Post Type",
            SchemaKind::Taxonomy => "Taxonomy",
        };
        print_table(&[heading, "Label", "Fields", "REST API"], &rows);
        printed = true;
    }

    0
}
