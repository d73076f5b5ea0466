//! `ignis validate <slug>` / `ignis validate --all`

use super::{Context, Kind};
use clap::Args;
use ignis_schema::input::{parse_as, schema_files};
use ignis_schema::{LoadError, ValidationError, validate};
use std::path::Path;

#[derive(Args)]
pub struct ValidateArgs {
    /// Schema slug
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub slug: Option<String>,

    /// Validate every schema file in the directory, including files that fail to parse
    #[arg(long)]
    pub all: bool,

    #[arg(long, value_enum, default_value = "post-type")]
    pub kind: Kind,
}

pub fn run(args: ValidateArgs, ctx: &Context) -> i32 {
    match args.slug {
        Some(slug) if !args.all => validate_one(&slug, args.kind, ctx),
        _ => validate_all(args.kind, ctx),
    }
}

fn validate_one(slug: &str, kind: Kind, ctx: &Context) -> i32 {
    println!("Validating schema: {}", slug);
    match ctx.load_schema(kind.into(), slug) {
        Ok(doc) => report(&validate(&doc)),
        Err(e) => {
            eprintln!("{}: {}", slug, e);
            1
        }
    }
}

fn validate_all(kind: Kind, ctx: &Context) -> i32 {
    let dir = ctx.schema_dir(kind.into());
    if !dir.is_dir() {
        eprintln!("error: {}", LoadError::DirectoryNotFound(dir.to_path_buf()));
        return 1;
    }

    let files = schema_files(dir);
    if files.is_empty() {
        eprintln!("No schemas found in {}", dir.display());
        return 0;
    }

    let mut failed = 0;
    for path in &files {
        println!("Validating schema: {}", file_stem(path));
        let status = match parse_as(path, Some(kind.into())) {
            Ok(doc) => report(&validate(&doc)),
            Err(e) => {
                println!("Schema could not be loaded:");
                println!("  - {}", e);
                1
            }
        };
        if status != 0 {
            failed += 1;
        }
    }

    println!();
    println!("{} of {} schemas valid", files.len() - failed, files.len());
    if failed == 0 { 0 } else { 1 }
}

fn report(errors: &[ValidationError]) -> i32 {
    if errors.is_empty() {
        println!("Schema is valid!");
        return 0;
    }
    println!("Schema has validation errors:");
    for error in errors {
        println!("  - {}", error);
    }
    1
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
