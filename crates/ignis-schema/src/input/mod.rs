//! Schema loading.
//!
//! Reads YAML or JSON schema files into [`SchemaDocument`]s. Single-file
//! operations fail fast; directory loads log and skip files that fail to
//! parse so one malformed schema never hides the rest.

use crate::schema::{SchemaDocument, SchemaKind, SchemaSet};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File extensions recognised as schema documents, in lookup order.
pub const SCHEMA_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("schema file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unsupported schema format: {extension} ({})", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Write {
            path: path.into(),
            source,
        }
    }
}

/// Source syntax of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Decode text into a generic tree without interpreting it.
    pub fn decode(self, content: &str) -> Result<Value, String> {
        match self {
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Parse a schema file, detecting the format from its extension.
pub fn parse(path: &Path) -> Result<SchemaDocument, LoadError> {
    parse_as(path, None)
}

/// Parse a schema file that is expected to be of `kind` (when given).
pub fn parse_as(path: &Path, kind: Option<SchemaKind>) -> Result<SchemaDocument, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let format = Format::from_extension(extension).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: extension.to_string(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    parse_str(&content, format, kind).map_err(|message| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse schema text already in memory.
pub fn parse_str(
    content: &str,
    format: Format,
    kind: Option<SchemaKind>,
) -> Result<SchemaDocument, String> {
    let value = format.decode(content)?;
    SchemaDocument::from_value(value, kind).map_err(|e| e.to_string())
}

/// Load every post-type schema in `dir` (non-recursive), keyed by slug.
///
/// Fails only when the directory itself is missing.
pub fn load_directory(dir: &Path) -> Result<SchemaSet, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }
    Ok(load_kind(dir, SchemaKind::PostType))
}

/// Load every taxonomy schema in `dir`, keyed by slug.
///
/// Taxonomies are optional: a missing directory yields an empty set.
pub fn load_taxonomy_directory(dir: &Path) -> SchemaSet {
    if !dir.is_dir() {
        debug!("taxonomy directory {} does not exist", dir.display());
        return SchemaSet::new();
    }
    load_kind(dir, SchemaKind::Taxonomy)
}

/// Load `dir` as the directory for `kind`, with the per-kind missing-directory rule.
pub fn load_kind_directory(dir: &Path, kind: SchemaKind) -> Result<SchemaSet, LoadError> {
    match kind {
        SchemaKind::PostType => load_directory(dir),
        SchemaKind::Taxonomy => Ok(load_taxonomy_directory(dir)),
    }
}

fn load_kind(dir: &Path, kind: SchemaKind) -> SchemaSet {
    let mut schemas = SchemaSet::new();

    for path in schema_files(dir) {
        match parse_as(&path, Some(kind)) {
            Ok(doc) => {
                let slug = doc
                    .slug()
                    .map(String::from)
                    .unwrap_or_else(|| file_stem(&path));
                debug!("loaded {} schema {} from {}", kind, slug, path.display());
                if schemas.insert(slug.clone(), doc).is_some() {
                    warn!(
                        "duplicate {} schema {}; {} replaces the earlier definition",
                        kind,
                        slug,
                        path.display()
                    );
                }
            }
            Err(e) => warn!("failed to load {} schema: {}", kind, e),
        }
    }

    schemas
}

/// Schema files directly inside `dir`, sorted by file name.
pub fn schema_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SCHEMA_EXTENSIONS.contains(&e))
        })
        .collect()
}

/// Locate `<slug>.yaml`, `<slug>.yml` or `<slug>.json` in `dir`.
pub fn find_schema_file(dir: &Path, slug: &str) -> Result<PathBuf, LoadError> {
    SCHEMA_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", slug, ext)))
        .find(|path| path.is_file())
        .ok_or_else(|| LoadError::SchemaNotFound(slug.to_string()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
