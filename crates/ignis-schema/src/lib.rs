//! Schema-to-artifact compiler for WordPress content types.
//!
//! `ignis-schema` reads declarative schema documents (YAML or JSON) describing
//! custom post types, taxonomies and their custom fields, and lowers them into
//! artifacts for two independent consumers.
//!
//! # Architecture
//!
//! ```text
//! Input              Model                Outputs
//! ─────────      ──────────────       ─────────────────────────────
//! *.yaml    ─┐                     ┌─> field groups (ACF)
//! *.yml     ─┼─> SchemaDocument ───┼─> registration arguments
//! *.json    ─┘   (schema/)         ├─> TypeScript definitions
//!                     │            └─> Markdown documentation
//!                     └─> validate / resolve_relations
//! ```
//!
//! # Example
//!
//! ```
//! use ignis_schema::{input, output, validate};
//!
//! let doc = input::parse_str(
//!     r#"
//! post_type: contact
//! label: Contacts
//! fields:
//!   contact_name:
//!     type: text
//!     label: Full Name
//!     required: true
//! "#,
//!     input::Format::Yaml,
//!     None,
//! )
//! .unwrap();
//!
//! assert!(validate::validate(&doc).is_empty());
//!
//! let ts = output::typescript::emit(&doc);
//! assert!(ts.contains("export interface ContactACF {"));
//! assert!(ts.contains("  contact_name: string;"));
//! ```
//!
//! # Feature Flags
//!
//! - `backend-typescript` - TypeScript interfaces for the REST API
//! - `backend-markdown` - Markdown reference documentation

pub mod field_group;
pub mod input;
pub mod output;
pub mod registration;
pub mod registry;
pub mod relations;
pub mod repository;
pub mod scaffold;
pub mod schema;
pub mod traits;
pub mod validate;

// Re-export commonly used items
pub use input::{Format, LoadError, load_directory, load_taxonomy_directory, parse};
pub use schema::{
    FieldSpec, FieldType, Layout, PostTypeSchema, SchemaDocument, SchemaKind, SchemaSet,
    TaxonomySchema,
};

// Re-export traits
pub use traits::{ContentRegistrar, Emitter, FieldGroupSink};

// Re-export registry functions
pub use registry::{emitter_names, emitters, get_emitter, register_emitter};

pub use field_group::{FieldGroup, generate_field, generate_field_group, generate_field_group_as};
pub use registration::{
    PostTypeArgs, RegistrationSummary, TaxonomyArgs, post_type_args, register_all, register_one,
    taxonomy_args,
};
pub use relations::{RelationMap, resolve_relations};
pub use repository::SchemaRepository;
pub use scaffold::{
    sanitize_field_key, sanitize_post_type_slug, scaffold_field, scaffold_post_type,
    scaffold_taxonomy,
};
pub use validate::{ValidationError, validate};

#[cfg(feature = "backend-typescript")]
pub use output::typescript::{TypeScriptEmitter, emit_directory, map_field_type, to_type_name};

#[cfg(feature = "backend-markdown")]
pub use output::markdown::{MarkdownEmitter, generate_documentation, generate_documentation_as};
