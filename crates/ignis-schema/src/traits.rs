//! Seams between the compiler and its consumers.

use crate::field_group::FieldGroup;
use crate::registration::{PostTypeArgs, TaxonomyArgs};
use crate::schema::SchemaDocument;

/// A text artifact generator.
///
/// Emitters turn one [`SchemaDocument`] into one output unit (a `.ts` file,
/// a Markdown page). The unit is named after the slug it was loaded under,
/// which is the file stem when the document declares none.
///
/// # Implementing Custom Emitters
///
/// ```ignore
/// use ignis_schema::{Emitter, SchemaDocument, register_emitter};
///
/// struct JsonSchemaEmitter;
///
/// impl Emitter for JsonSchemaEmitter {
///     fn name(&self) -> &'static str { "json-schema" }
///     fn extension(&self) -> &'static str { "json" }
///     fn emit(&self, slug: &str, doc: &SchemaDocument) -> String { /* ... */ }
/// }
///
/// register_emitter(&JsonSchemaEmitter);
/// ```
pub trait Emitter: Send + Sync {
    /// Unique emitter identifier (e.g. "typescript", "markdown").
    fn name(&self) -> &'static str;

    /// File extension of the output unit, without the dot.
    fn extension(&self) -> &'static str;

    fn emit(&self, slug: &str, doc: &SchemaDocument) -> String;
}

/// The host's custom-fields runtime.
pub trait FieldGroupSink {
    fn add_field_group(&mut self, group: &FieldGroup);
}

/// The host's content-type registration APIs.
pub trait ContentRegistrar: FieldGroupSink {
    fn register_post_type(&mut self, slug: &str, args: &PostTypeArgs);

    /// `post_types` are the resolved associations for this taxonomy.
    fn register_taxonomy(&mut self, slug: &str, post_types: &[String], args: &TaxonomyArgs);

    /// Rebuild permalink rules after content types change.
    fn flush_rewrite_rules(&mut self) {}
}
