//! The loaded schema collections, passed explicitly to their consumers.

use crate::input::{LoadError, load_directory, load_taxonomy_directory};
use crate::relations::{RelationMap, resolve_relations};
use crate::schema::{SchemaDocument, SchemaKind, SchemaSet};
use std::path::{Path, PathBuf};
use tracing::info;

/// Post-type and taxonomy schemas loaded from their two directories.
#[derive(Debug, Clone)]
pub struct SchemaRepository {
    post_types_dir: PathBuf,
    taxonomies_dir: PathBuf,
    post_types: SchemaSet,
    taxonomies: SchemaSet,
}

impl SchemaRepository {
    /// Load both directories. The post-type directory must exist; the
    /// taxonomy directory is optional.
    pub fn load(
        post_types_dir: impl Into<PathBuf>,
        taxonomies_dir: impl Into<PathBuf>,
    ) -> Result<Self, LoadError> {
        let post_types_dir = post_types_dir.into();
        let taxonomies_dir = taxonomies_dir.into();
        let post_types = load_directory(&post_types_dir)?;
        let taxonomies = load_taxonomy_directory(&taxonomies_dir);
        info!(
            "loaded {} post types and {} taxonomies",
            post_types.len(),
            taxonomies.len()
        );

        Ok(Self {
            post_types_dir,
            taxonomies_dir,
            post_types,
            taxonomies,
        })
    }

    /// Build a repository from collections already in memory.
    pub fn from_sets(post_types: SchemaSet, taxonomies: SchemaSet) -> Self {
        Self {
            post_types_dir: PathBuf::new(),
            taxonomies_dir: PathBuf::new(),
            post_types,
            taxonomies,
        }
    }

    /// Re-read both directories, replacing the current collections.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        *self = Self::load(self.post_types_dir.clone(), self.taxonomies_dir.clone())?;
        Ok(())
    }

    pub fn post_type(&self, slug: &str) -> Option<&SchemaDocument> {
        self.post_types.get(slug)
    }

    pub fn taxonomy(&self, slug: &str) -> Option<&SchemaDocument> {
        self.taxonomies.get(slug)
    }

    pub fn post_types(&self) -> &SchemaSet {
        &self.post_types
    }

    pub fn taxonomies(&self) -> &SchemaSet {
        &self.taxonomies
    }

    pub fn schemas(&self, kind: SchemaKind) -> &SchemaSet {
        match kind {
            SchemaKind::PostType => &self.post_types,
            SchemaKind::Taxonomy => &self.taxonomies,
        }
    }

    pub fn dir(&self, kind: SchemaKind) -> &Path {
        match kind {
            SchemaKind::PostType => &self.post_types_dir,
            SchemaKind::Taxonomy => &self.taxonomies_dir,
        }
    }

    /// Look up a schema, failing with [`LoadError::SchemaNotFound`].
    pub fn get(&self, kind: SchemaKind, slug: &str) -> Result<&SchemaDocument, LoadError> {
        self.schemas(kind)
            .get(slug)
            .ok_or_else(|| LoadError::SchemaNotFound(slug.to_string()))
    }

    /// Freshly resolved taxonomy associations.
    pub fn relations(&self) -> RelationMap {
        resolve_relations(&self.post_types, &self.taxonomies)
    }
}
