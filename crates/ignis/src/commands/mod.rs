//! CLI command implementations - one module per command family.
//!
//! Commands return a process exit code (0 on success, 1 on failure) and
//! report failures on stderr as `<slug>: <reason>`.

pub mod create;
pub mod export;
pub mod info;
pub mod list;
pub mod register;
pub mod validate;

use crate::config::IgnisConfig;
use clap::{Subcommand, ValueEnum};
use ignis_schema::input::{find_schema_file, load_kind_directory, parse_as};
use ignis_schema::{LoadError, SchemaDocument, SchemaKind, SchemaRepository, SchemaSet};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum Command {
    /// List the loaded schemas
    List(list::ListArgs),
    /// Show one schema
    Info(info::InfoArgs),
    /// Check schemas for structural errors
    Validate(validate::ValidateArgs),
    /// Write a starter schema
    Create(create::CreateArgs),
    /// Generate the TypeScript (or Markdown) unit for one schema
    Export(export::ExportArgs),
    /// Generate TypeScript units for every schema, plus an index
    #[command(name = "export-all")]
    ExportAll(export::ExportAllArgs),
    /// Print the registration arguments and field groups as JSON
    Register(register::RegisterArgs),
    /// Flush rewrite rules after content types change
    Flush,
}

/// Dispatch a parsed command.
pub fn run(command: Command, ctx: &Context) -> i32 {
    match command {
        Command::List(args) => list::run(args, ctx),
        Command::Info(args) => info::run(args, ctx),
        Command::Validate(args) => validate::run(args, ctx),
        Command::Create(args) => create::run(args, ctx),
        Command::Export(args) => export::run(args, ctx),
        Command::ExportAll(args) => export::run_all(args, ctx),
        Command::Register(args) => register::run(args, ctx),
        Command::Flush => register::flush(),
    }
}

/// The kind of a single schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    PostType,
    Taxonomy,
}

impl From<Kind> for SchemaKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::PostType => SchemaKind::PostType,
            Kind::Taxonomy => SchemaKind::Taxonomy,
        }
    }
}

/// Which schema collections a batch command covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    PostType,
    Taxonomy,
    All,
}

impl KindFilter {
    pub fn kinds(self) -> &'static [SchemaKind] {
        match self {
            KindFilter::PostType => &[SchemaKind::PostType],
            KindFilter::Taxonomy => &[SchemaKind::Taxonomy],
            KindFilter::All => &[SchemaKind::PostType, SchemaKind::Taxonomy],
        }
    }
}

/// Resolved locations shared by every command.
pub struct Context {
    pub root: PathBuf,
    pub config: IgnisConfig,
    post_types_dir: PathBuf,
    taxonomies_dir: PathBuf,
}

impl Context {
    /// Flag values win over configuration; relative paths hang off `root`.
    pub fn new(
        root: PathBuf,
        config: IgnisConfig,
        post_types: Option<PathBuf>,
        taxonomies: Option<PathBuf>,
    ) -> Self {
        let post_types_dir = root.join(post_types.unwrap_or_else(|| config.paths.post_types()));
        let taxonomies_dir = root.join(taxonomies.unwrap_or_else(|| config.paths.taxonomies()));
        Self {
            root,
            config,
            post_types_dir,
            taxonomies_dir,
        }
    }

    pub fn schema_dir(&self, kind: SchemaKind) -> &Path {
        match kind {
            SchemaKind::PostType => &self.post_types_dir,
            SchemaKind::Taxonomy => &self.taxonomies_dir,
        }
    }

    /// `output`, or the configured TypeScript output directory.
    pub fn output_dir(&self, output: Option<PathBuf>) -> PathBuf {
        self.root
            .join(output.unwrap_or_else(|| self.config.paths.typescript_output()))
    }

    pub fn repository(&self) -> Result<SchemaRepository, LoadError> {
        SchemaRepository::load(&self.post_types_dir, &self.taxonomies_dir)
    }

    pub fn load_schemas(&self, kind: SchemaKind) -> Result<SchemaSet, LoadError> {
        load_kind_directory(self.schema_dir(kind), kind)
    }

    /// Load one schema: `<slug>.<ext>` directly, so parse errors surface,
    /// falling back to a directory scan for files named differently.
    pub fn load_schema(&self, kind: SchemaKind, slug: &str) -> Result<SchemaDocument, LoadError> {
        let dir = self.schema_dir(kind);
        match find_schema_file(dir, slug) {
            Ok(path) => parse_as(&path, Some(kind)),
            Err(LoadError::SchemaNotFound(_)) if dir.is_dir() => self
                .load_schemas(kind)?
                .remove(slug)
                .ok_or_else(|| LoadError::SchemaNotFound(slug.to_string())),
            Err(e) => Err(e),
        }
    }
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Print left-aligned columns under a header row.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("{}", format_row(headers, &widths));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("{}", format_row(&cells, &widths));
    }
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}
