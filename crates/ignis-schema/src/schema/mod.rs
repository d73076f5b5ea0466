//! Schema documents: the typed form of one post-type or taxonomy file.
//!
//! Decoding applies no defaults. Every optional attribute stays `None` when
//! the source omits it, so the validator and the compilers can tell "not
//! specified" from an explicit value.

pub mod de;
mod field;

pub use field::{
    Condition, ConditionalLogic, FieldSpec, FieldType, Layout, UnknownFieldType, humanize, truthy,
};
pub(crate) use field::{capitalize, non_empty};

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A collection of loaded documents keyed by slug.
pub type SchemaSet = BTreeMap<String, SchemaDocument>;

/// Which kind of content a document describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    PostType,
    Taxonomy,
}

impl SchemaKind {
    /// The document key that carries the slug.
    pub fn identity_key(self) -> &'static str {
        match self {
            SchemaKind::PostType => "post_type",
            SchemaKind::Taxonomy => "taxonomy",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::PostType => "post-type",
            SchemaKind::Taxonomy => "taxonomy",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrite configuration: either a plain on/off switch or explicit rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rewrite {
    Toggle(bool),
    Rules(RewriteRules),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewriteRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::opt_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub with_front: Option<bool>,
    #[serde(
        default,
        deserialize_with = "de::opt_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub hierarchical: Option<bool>,
}

/// REST API overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestApi {
    #[serde(
        default,
        deserialize_with = "de::opt_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
}

/// A custom post type definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostTypeSchema {
    #[serde(rename = "post_type", default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub show_in_rest: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub hierarchical: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub has_archive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<Rewrite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_api: Option<RestApi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_icon: Option<String>,
    #[serde(default, with = "de::keyed", skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
    #[serde(default, deserialize_with = "de::string_list", skip_serializing_if = "Vec::is_empty")]
    pub taxonomies: Vec<String>,
}

/// A custom taxonomy definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomySchema {
    #[serde(rename = "taxonomy", default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub show_in_rest: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub hierarchical: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub show_ui: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub show_in_menu: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub show_in_nav_menus: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub show_tagcloud: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub show_admin_column: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_flag", skip_serializing_if = "Option::is_none")]
    pub query_var: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<Rewrite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_api: Option<RestApi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "de::string_list", skip_serializing_if = "Vec::is_empty")]
    pub post_types: Vec<String>,
    #[serde(default, with = "de::keyed", skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
}

/// One parsed schema file.
///
/// Built through [`SchemaDocument::from_value`], which discriminates on the
/// identity key; serializes back to the source layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaDocument {
    PostType(PostTypeSchema),
    Taxonomy(TaxonomySchema),
}

impl From<PostTypeSchema> for SchemaDocument {
    fn from(schema: PostTypeSchema) -> Self {
        SchemaDocument::PostType(schema)
    }
}

impl From<TaxonomySchema> for SchemaDocument {
    fn from(schema: TaxonomySchema) -> Self {
        SchemaDocument::Taxonomy(schema)
    }
}

impl SchemaDocument {
    /// Decode a document from its generic tree.
    ///
    /// The kind comes from the identity key (`post_type` or `taxonomy`); both
    /// at once is an error. A document with neither takes `expected`, falling
    /// back to a post type. A declared kind that contradicts `expected` is an
    /// error.
    pub fn from_value(value: Value, expected: Option<SchemaKind>) -> serde_json::Result<Self> {
        let Value::Object(map) = &value else {
            return Err(serde_json::Error::custom(
                "schema document must be a mapping at the top level",
            ));
        };

        let declared = match (map.contains_key("post_type"), map.contains_key("taxonomy")) {
            (true, true) => {
                return Err(serde_json::Error::custom(
                    "schema declares both `post_type` and `taxonomy`",
                ));
            }
            (true, false) => Some(SchemaKind::PostType),
            (false, true) => Some(SchemaKind::Taxonomy),
            (false, false) => None,
        };

        let kind = match (declared, expected) {
            (Some(declared), Some(expected)) if declared != expected => {
                return Err(serde_json::Error::custom(format!(
                    "expected a {} schema, found a {} schema",
                    expected, declared
                )));
            }
            (Some(kind), _) | (None, Some(kind)) => kind,
            (None, None) => SchemaKind::PostType,
        };

        Ok(match kind {
            SchemaKind::PostType => SchemaDocument::PostType(serde_json::from_value(value)?),
            SchemaKind::Taxonomy => SchemaDocument::Taxonomy(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            SchemaDocument::PostType(_) => SchemaKind::PostType,
            SchemaDocument::Taxonomy(_) => SchemaKind::Taxonomy,
        }
    }

    /// The declared slug, if present and non-empty.
    pub fn slug(&self) -> Option<&str> {
        let slug = match self {
            SchemaDocument::PostType(s) => s.slug.as_deref(),
            SchemaDocument::Taxonomy(s) => s.slug.as_deref(),
        };
        non_empty(slug)
    }

    pub fn label(&self) -> Option<&str> {
        let label = match self {
            SchemaDocument::PostType(s) => s.label.as_deref(),
            SchemaDocument::Taxonomy(s) => s.label.as_deref(),
        };
        non_empty(label)
    }

    /// Singular label, falling back to the plural label.
    pub fn singular_label(&self) -> Option<&str> {
        let singular = match self {
            SchemaDocument::PostType(s) => s.singular_label.as_deref(),
            SchemaDocument::Taxonomy(s) => s.singular_label.as_deref(),
        };
        non_empty(singular).or_else(|| self.label())
    }

    pub fn description(&self) -> Option<&str> {
        let description = match self {
            SchemaDocument::PostType(s) => s.description.as_deref(),
            SchemaDocument::Taxonomy(s) => s.description.as_deref(),
        };
        non_empty(description)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        match self {
            SchemaDocument::PostType(s) => &s.fields,
            SchemaDocument::Taxonomy(s) => &s.fields,
        }
    }

    pub fn rest_api(&self) -> Option<&RestApi> {
        match self {
            SchemaDocument::PostType(s) => s.rest_api.as_ref(),
            SchemaDocument::Taxonomy(s) => s.rest_api.as_ref(),
        }
    }

    /// Effective REST visibility: `show_in_rest` (registered default `true`),
    /// or an explicit `rest_api.enabled`.
    pub fn rest_enabled(&self) -> bool {
        let show_in_rest = match self {
            SchemaDocument::PostType(s) => s.show_in_rest,
            SchemaDocument::Taxonomy(s) => s.show_in_rest,
        };
        let explicit = self.rest_api().and_then(|r| r.enabled);
        match (show_in_rest, explicit) {
            (Some(true), _) | (_, Some(true)) => true,
            (Some(false), _) => false,
            (None, _) => true,
        }
    }

    /// REST route segment: `rest_api.base` or the slug.
    pub fn rest_base(&self) -> Option<&str> {
        self.rest_api()
            .and_then(|r| non_empty(r.base.as_deref()))
            .or_else(|| self.slug())
    }

    pub fn as_post_type(&self) -> Option<&PostTypeSchema> {
        match self {
            SchemaDocument::PostType(s) => Some(s),
            SchemaDocument::Taxonomy(_) => None,
        }
    }

    pub fn as_taxonomy(&self) -> Option<&TaxonomySchema> {
        match self {
            SchemaDocument::Taxonomy(s) => Some(s),
            SchemaDocument::PostType(_) => None,
        }
    }
}

impl PostTypeSchema {
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    /// Whether `feature` is in the declared `supports` list.
    pub fn declares_support(&self, feature: &str) -> bool {
        self.supports
            .as_ref()
            .is_some_and(|s| s.iter().any(|f| f == feature))
    }
}

impl TaxonomySchema {
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    pub fn is_hierarchical(&self) -> bool {
        self.hierarchical.unwrap_or(false)
    }
}
