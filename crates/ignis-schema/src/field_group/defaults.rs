//! Per-type option defaults for compiled fields.
//!
//! Each type lists the options a renderer expects, with the value used when
//! the schema does not override it. Nested structure (`sub_fields`,
//! `layouts`) is compiled separately and does not appear here.

use crate::schema::FieldType;
use serde_json::{Value, json};

/// Ordered `(option, default)` pairs for `field_type`.
pub fn type_defaults(field_type: FieldType) -> Vec<(&'static str, Value)> {
    match field_type {
        FieldType::Text => vec![
            ("maxlength", blank()),
            ("readonly", json!(false)),
            ("disabled", json!(false)),
        ],
        FieldType::Textarea => vec![
            ("rows", json!(4)),
            ("maxlength", blank()),
            ("new_lines", blank()),
            ("readonly", json!(false)),
            ("disabled", json!(false)),
        ],
        FieldType::Number => vec![
            ("min", blank()),
            ("max", blank()),
            ("step", blank()),
            ("prepend", blank()),
            ("append", blank()),
        ],
        FieldType::Email | FieldType::Url | FieldType::Password => {
            vec![("prepend", blank()), ("append", blank())]
        }
        FieldType::Select => vec![
            ("choices", json!({})),
            ("allow_null", json!(false)),
            ("multiple", json!(false)),
            ("ui", json!(false)),
            ("ajax", json!(false)),
            ("return_format", json!("value")),
        ],
        FieldType::Checkbox => vec![
            ("choices", json!({})),
            ("layout", json!("vertical")),
            ("toggle", json!(false)),
            ("return_format", json!("value")),
            ("allow_custom", json!(false)),
        ],
        FieldType::Radio => vec![
            ("choices", json!({})),
            ("layout", json!("vertical")),
            ("return_format", json!("value")),
            ("allow_null", json!(false)),
            ("other_choice", json!(false)),
        ],
        FieldType::TrueFalse => vec![
            ("message", blank()),
            ("ui", json!(false)),
            ("ui_on_text", blank()),
            ("ui_off_text", blank()),
        ],
        FieldType::Wysiwyg => vec![
            ("tabs", json!("all")),
            ("toolbar", json!("full")),
            ("media_upload", json!(true)),
            ("delay", json!(false)),
        ],
        FieldType::Oembed => vec![("width", blank()), ("height", blank())],
        FieldType::Image => {
            let mut defaults = vec![
                ("return_format", json!("array")),
                ("preview_size", json!("medium")),
                ("library", json!("all")),
            ];
            defaults.extend(blanks(&["min_width", "min_height", "max_width", "max_height"]));
            defaults.extend(blanks(&["min_size", "max_size", "mime_types"]));
            defaults
        }
        FieldType::File => {
            let mut defaults = vec![("return_format", json!("array")), ("library", json!("all"))];
            defaults.extend(blanks(&["min_size", "max_size", "mime_types"]));
            defaults
        }
        FieldType::Gallery => {
            let mut defaults = vec![
                ("return_format", json!("array")),
                ("preview_size", json!("medium")),
                ("insert", json!("append")),
                ("library", json!("all")),
            ];
            defaults.extend(blanks(&["min", "max"]));
            defaults.extend(blanks(&["min_width", "min_height", "max_width", "max_height"]));
            defaults.extend(blanks(&["min_size", "max_size", "mime_types"]));
            defaults
        }
        FieldType::PostObject => vec![
            ("post_type", json!([])),
            ("taxonomy", json!([])),
            ("allow_null", json!(false)),
            ("multiple", json!(false)),
            ("return_format", json!("object")),
            ("ui", json!(true)),
        ],
        FieldType::Relationship => vec![
            ("post_type", json!([])),
            ("taxonomy", json!([])),
            ("filters", json!(["search", "post_type", "taxonomy"])),
            ("elements", json!([])),
            ("min", blank()),
            ("max", blank()),
            ("return_format", json!("object")),
        ],
        FieldType::Taxonomy => vec![
            ("taxonomy", json!("category")),
            ("field_type", json!("checkbox")),
            ("add_term", json!(true)),
            ("save_terms", json!(true)),
            ("load_terms", json!(true)),
            ("return_format", json!("id")),
            ("multiple", json!(false)),
            ("allow_null", json!(false)),
        ],
        FieldType::User => vec![
            ("role", json!([])),
            ("allow_null", json!(false)),
            ("multiple", json!(false)),
            ("return_format", json!("array")),
        ],
        FieldType::Repeater => vec![
            ("min", json!(0)),
            ("max", json!(0)),
            ("layout", json!("table")),
            ("button_label", json!("Add Row")),
            ("collapsed", blank()),
        ],
        FieldType::Group => vec![("layout", json!("block"))],
        FieldType::FlexibleContent => vec![
            ("button_label", json!("Add Row")),
            ("min", blank()),
            ("max", blank()),
        ],
        FieldType::DatePicker => vec![
            ("display_format", json!("m/d/Y")),
            ("return_format", json!("Y-m-d")),
            ("first_day", json!(1)),
        ],
        FieldType::TimePicker => vec![
            ("display_format", json!("g:i a")),
            ("return_format", json!("H:i:s")),
        ],
        FieldType::DateTimePicker => vec![
            ("display_format", json!("m/d/Y g:i a")),
            ("return_format", json!("Y-m-d H:i:s")),
            ("first_day", json!(1)),
        ],
        FieldType::ColorPicker => vec![
            ("enable_opacity", json!(false)),
            ("return_format", json!("string")),
        ],
        FieldType::GoogleMap => blanks(&["center_lat", "center_lng", "zoom", "height"]),
        FieldType::Link => vec![("return_format", json!("array"))],
    }
}

fn blank() -> Value {
    Value::String(String::new())
}

fn blanks(names: &[&'static str]) -> Vec<(&'static str, Value)> {
    names.iter().map(|name| (*name, blank())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_defaults() {
        for ty in FieldType::ALL {
            assert!(!type_defaults(ty).is_empty(), "{} has no defaults", ty);
        }
    }

    #[test]
    fn option_names_are_unique_per_type() {
        for ty in FieldType::ALL {
            let defaults = type_defaults(ty);
            let mut names: Vec<_> = defaults.iter().map(|(name, _)| *name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), defaults.len(), "duplicate option for {}", ty);
        }
    }

    #[test]
    fn select_defaults() {
        let defaults = type_defaults(FieldType::Select);
        assert!(defaults.contains(&("allow_null", json!(false))));
        assert!(defaults.contains(&("multiple", json!(false))));
        assert!(defaults.contains(&("return_format", json!("value"))));
    }
}
