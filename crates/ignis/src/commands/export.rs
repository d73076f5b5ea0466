//! `ignis export <slug>` and `ignis export-all`

use super::{Context, Kind, KindFilter};
use clap::Args;
use ignis_schema::output::typescript;
use ignis_schema::{emitter_names, get_emitter};
use std::path::PathBuf;

#[derive(Args)]
pub struct ExportArgs {
    /// Schema slug
    pub slug: String,

    #[arg(long, value_enum, default_value = "post-type")]
    pub kind: Kind,

    /// Output directory (defaults to the configured TypeScript output)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Emitter name: typescript, markdown
    #[arg(short, long, default_value = "typescript")]
    pub format: String,
}

#[derive(Args)]
pub struct ExportAllArgs {
    /// Which schemas to export
    #[arg(long, value_enum, default_value = "all")]
    pub kind: KindFilter,

    /// Output directory (defaults to the configured TypeScript output)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, ctx: &Context) -> i32 {
    let Some(emitter) = get_emitter(&args.format) else {
        eprintln!("Unknown format: {}. Available:", args.format);
        for name in emitter_names() {
            eprintln!("  {}", name);
        }
        return 1;
    };

    let doc = match ctx.load_schema(args.kind.into(), &args.slug) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}: {}", args.slug, e);
            return 1;
        }
    };

    let out_dir = ctx.output_dir(args.output);
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        eprintln!("Failed to create {}: {}", out_dir.display(), e);
        return 1;
    }
    let slug = doc.slug().unwrap_or(&args.slug);
    let path = out_dir.join(format!("{}.{}", args.slug, emitter.extension()));
    if let Err(e) = std::fs::write(&path, emitter.emit(slug, &doc)) {
        eprintln!("Failed to write {}: {}", path.display(), e);
        return 1;
    }

    let what = match emitter.name() {
        "typescript" => "TypeScript types",
        "markdown" => "Documentation",
        other => other,
    };
    println!("{} exported to: {}", what, path.display());
    0
}

pub fn run_all(args: ExportAllArgs, ctx: &Context) -> i32 {
    let out_dir = ctx.output_dir(args.output);
    let mut written = Vec::new();
    let mut slugs = Vec::new();

    for &kind in args.kind.kinds() {
        let schemas = match ctx.load_schemas(kind) {
            Ok(schemas) => schemas,
            Err(e) => {
                eprintln!("error: {}", e);
                return 1;
            }
        };
        match typescript::write_units(&schemas, &out_dir) {
            Ok(paths) => written.extend(paths),
            Err(e) => {
                eprintln!("error: {}", e);
                return 1;
            }
        }
        slugs.extend(schemas.into_keys());
    }

    if ctx.config.typescript.index() {
        slugs.sort();
        slugs.dedup();
        if let Err(e) = typescript::write_index(slugs.iter().map(String::as_str), &out_dir) {
            eprintln!("error: {}", e);
            return 1;
        }
    }

    println!(
        "Exported {} type definitions to: {}",
        written.len(),
        out_dir.display()
    );
    for path in &written {
        if let Some(name) = path.file_name() {
            println!("  - {}", name.to_string_lossy());
        }
    }
    0
}
