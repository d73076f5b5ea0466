//! Taxonomy ↔ post-type association.
//!
//! Either side may declare the link: a taxonomy through `post_types`, a post
//! type through `taxonomies`. Neither side has to be complete.

use crate::schema::{SchemaDocument, SchemaSet};
use std::collections::{BTreeMap, BTreeSet};

/// Taxonomy slug → post-type slugs it is attached to.
pub type RelationMap = BTreeMap<String, BTreeSet<String>>;

/// Merge both declaration sides into one map.
///
/// Every loaded taxonomy gets an entry, even when nothing references it. A
/// post type may name a taxonomy that is not loaded; it still gets an entry.
pub fn resolve_relations(post_types: &SchemaSet, taxonomies: &SchemaSet) -> RelationMap {
    let mut relations: RelationMap = taxonomies
        .keys()
        .map(|slug| (slug.clone(), BTreeSet::new()))
        .collect();

    for (slug, doc) in taxonomies {
        if let SchemaDocument::Taxonomy(taxonomy) = doc {
            relations
                .entry(slug.clone())
                .or_default()
                .extend(taxonomy.post_types.iter().cloned());
        }
    }

    for (slug, doc) in post_types {
        if let SchemaDocument::PostType(post_type) = doc {
            for taxonomy in &post_type.taxonomies {
                relations
                    .entry(taxonomy.clone())
                    .or_default()
                    .insert(slug.clone());
            }
        }
    }

    relations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PostTypeSchema, TaxonomySchema};

    fn set(docs: Vec<SchemaDocument>) -> SchemaSet {
        docs.into_iter()
            .map(|d| (d.slug().unwrap().to_string(), d))
            .collect()
    }

    fn slugs(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn post_type_side_only() {
        let mut product = PostTypeSchema::new("product", "Products");
        product.taxonomies = vec!["product_category".into()];

        let relations = resolve_relations(
            &set(vec![product.into()]),
            &set(vec![TaxonomySchema::new("product_category", "Categories").into()]),
        );

        assert_eq!(relations.len(), 1);
        assert_eq!(relations["product_category"], slugs(&["product"]));
    }

    #[test]
    fn both_sides_merge_without_duplicates() {
        let mut genre = TaxonomySchema::new("genre", "Genres");
        genre.post_types = vec!["book".into(), "film".into()];
        let mut book = PostTypeSchema::new("book", "Books");
        book.taxonomies = vec!["genre".into()];
        let mut album = PostTypeSchema::new("album", "Albums");
        album.taxonomies = vec!["genre".into()];

        let post_types = set(vec![book.into(), album.into()]);
        let taxonomies = set(vec![genre.into()]);

        let first = resolve_relations(&post_types, &taxonomies);
        assert_eq!(first["genre"], slugs(&["album", "book", "film"]));
        assert_eq!(resolve_relations(&post_types, &taxonomies), first);
    }

    #[test]
    fn unknown_taxonomy_gets_an_entry_and_unreferenced_stays_empty() {
        let mut event = PostTypeSchema::new("event", "Events");
        event.taxonomies = vec!["venue".into()];

        let relations = resolve_relations(
            &set(vec![event.into()]),
            &set(vec![TaxonomySchema::new("tag_cloud", "Tags").into()]),
        );

        assert_eq!(relations["venue"], slugs(&["event"]));
        assert!(relations["tag_cloud"].is_empty());
    }
}
