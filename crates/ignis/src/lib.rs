//! The `ignis` command-line tool: schema listing, validation, scaffolding,
//! TypeScript export and registration previews on top of `ignis-schema`.

pub mod commands;
pub mod config;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ignis")]
#[command(version)]
#[command(about = "Compile WordPress content-type schemas into field groups and TypeScript types")]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Post-type schema directory, relative to the root
    #[arg(long, global = true, value_name = "DIR")]
    pub post_types: Option<PathBuf>,

    /// Taxonomy schema directory, relative to the root
    #[arg(long, global = true, value_name = "DIR")]
    pub taxonomies: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: commands::Command,
}
