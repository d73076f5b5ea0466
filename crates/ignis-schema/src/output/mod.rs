//! Text artifact emitters.
//!
//! Each emitter takes a [`SchemaDocument`](crate::schema::SchemaDocument) and
//! produces one output unit. All emitters implement the
//! [`Emitter`](crate::traits::Emitter) trait for uniform access via the
//! registry.

// TypeScript
#[cfg(feature = "backend-typescript")]
pub mod typescript;

#[cfg(feature = "backend-typescript")]
pub use typescript::{TypeScriptEmitter, emit_directory, map_field_type, to_type_name};

// Markdown
#[cfg(feature = "backend-markdown")]
pub mod markdown;

#[cfg(feature = "backend-markdown")]
pub use markdown::{MarkdownEmitter, generate_documentation, generate_documentation_as};
