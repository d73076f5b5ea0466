//! End-to-end tests for the `ignis` binary against a scratch project.

use assert_cmd::Command;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

const CONTACT: &str = "\
post_type: contact
label: Contacts
fields:
  contact_name:
    type: text
    label: Full Name
    required: true
  contact_email:
    type: email
    label: Email
";

const GENRE: &str = "\
taxonomy: genre
label: Genres
post_types: contact
fields:
  color:
    type: color_picker
    label: Colour
";

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let post_types = dir.path().join("schemas/post-types");
    let taxonomies = dir.path().join("schemas/taxonomies");
    std::fs::create_dir_all(&post_types).unwrap();
    std::fs::create_dir_all(&taxonomies).unwrap();
    std::fs::write(post_types.join("contact.yaml"), CONTACT).unwrap();
    std::fs::write(taxonomies.join("genre.yaml"), GENRE).unwrap();
    dir
}

fn ignis(root: &Path, args: &[&str]) -> Output {
    Command::cargo_bin("ignis")
        .unwrap()
        .arg("--root")
        .arg(root)
        .args(args)
        .env("XDG_CONFIG_HOME", root.join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute ignis")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_shows_both_kinds() {
    let dir = project();
    let output = ignis(dir.path(), &["list"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Post Type  Label     Fields  REST API\n"));
    assert!(out.contains("contact    Contacts  2       Yes\n"));
    assert!(out.contains("genre     Genres  1       Yes\n"));
}

#[test]
fn info_table_and_json() {
    let dir = project();
    let output = ignis(dir.path(), &["info", "contact"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Schema: Contacts\nPost Type: contact\nDescription: N/A\nREST API: Enabled\n"));
    assert!(out.contains("contact_name   Full Name  text   Yes\n"));

    let output = ignis(dir.path(), &["info", "genre", "--kind", "taxonomy", "--format", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["taxonomy"], "genre");
    assert_eq!(json["fields"]["color"]["type"], "color_picker");
}

#[test]
fn info_unknown_slug_fails() {
    let dir = project();
    let output = ignis(dir.path(), &["info", "nope"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("nope: schema not found: nope"));
}

#[test]
fn validate_reports_errors() {
    let dir = project();
    let output = ignis(dir.path(), &["validate", "contact"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Validating schema: contact\nSchema is valid!\n");

    std::fs::write(
        dir.path().join("schemas/post-types/bad.yaml"),
        "post_type: Bad-Type\nfields:\n  x:\n    type: colour\n    label: X\n",
    )
    .unwrap();
    let output = ignis(dir.path(), &["validate", "bad"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Validating schema: bad\n\
         Schema has validation errors:\n  \
         - post_type must contain only lowercase letters, numbers, and underscores\n  \
         - Missing required field: label\n  \
         - Field 'x' has invalid type: colour\n"
    );
}

#[test]
fn validate_all_includes_unparseable_files() {
    let dir = project();
    std::fs::write(dir.path().join("schemas/post-types/broken.yaml"), "fields: [").unwrap();

    let output = ignis(dir.path(), &["validate", "--all"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Validating schema: broken\nSchema could not be loaded:\n"));
    assert!(out.ends_with("1 of 2 schemas valid\n"));
}

#[test]
fn create_writes_a_loadable_schema() {
    let dir = project();
    let output = ignis(
        dir.path(),
        &["create", "Case Studies", "--prompt", "Client success stories"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let path = dir.path().join("schemas/post-types/case_studies.yaml");
    assert!(stdout(&output).contains(&format!("Schema created: {}", path.display())));

    let output = ignis(dir.path(), &["validate", "case_studies"]);
    assert!(output.status.success());

    let output = ignis(dir.path(), &["create", "case_studies", "--prompt", "again"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Schema already exists. Use --overwrite to replace it."));

    let output = ignis(
        dir.path(),
        &["create", "case_studies", "--prompt", "again", "--overwrite"],
    );
    assert!(output.status.success());
    let yaml = std::fs::read_to_string(&path).unwrap();
    assert!(yaml.contains("description: again\n"));
}

#[test]
fn create_adds_labelled_fields() {
    let dir = project();
    let output = ignis(
        dir.path(),
        &[
            "create", "venues", "--prompt", "Places", "--field", "Street Address", "--field",
            "Name",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let yaml = std::fs::read_to_string(dir.path().join("schemas/post-types/venues.yaml")).unwrap();
    assert!(yaml.contains("  street_address:\n    type: text\n    label: Street Address\n"));
    assert_eq!(yaml.matches("  name:\n").count(), 1);

    let output = ignis(dir.path(), &["create", "rooms", "--prompt", "x", "--field", "%%"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Field label '%%' does not yield a usable key"));
}

#[test]
fn create_requires_a_prompt() {
    let dir = project();
    let output = ignis(dir.path(), &["create", "events"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Please provide a --prompt with the schema description"));
}

#[test]
fn export_single_unit() {
    let dir = project();
    let output = ignis(dir.path(), &["export", "contact"]);
    assert!(output.status.success());

    let path = dir.path().join("typescript/contact.ts");
    assert!(stdout(&output).contains(&format!("TypeScript types exported to: {}", path.display())));
    let ts = std::fs::read_to_string(path).unwrap();
    assert!(ts.contains("  contact_name: string;\n"));
    assert!(ts.contains("  contact_email?: string;\n"));

    let output = ignis(dir.path(), &["export", "contact", "--format", "markdown"]);
    assert!(output.status.success());
    assert!(dir.path().join("typescript/contact.md").exists());

    let output = ignis(dir.path(), &["export", "contact", "--format", "zod"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown format: zod. Available:"));
}

#[test]
fn export_names_undeclared_schema_after_file() {
    let dir = project();
    std::fs::write(
        dir.path().join("schemas/post-types/event.json"),
        r#"{"label": "Events", "fields": {"starts_at": {"type": "date_time_picker", "required": true}}}"#,
    )
    .unwrap();

    let output = ignis(dir.path(), &["export", "event", "--output", "out"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let ts = std::fs::read_to_string(dir.path().join("out/event.ts")).unwrap();
    assert!(ts.contains(" * @generated from schema: event.yaml\n"));
    assert!(ts.contains("export interface EventACF {\n  starts_at: string;\n}\n"));
    assert!(ts.contains("export interface Event {\n"));
    assert!(ts.contains("  type: 'event';\n"));

    let output = ignis(dir.path(), &["export", "event", "--output", "out", "--format", "markdown"]);
    assert!(output.status.success());
    let md = std::fs::read_to_string(dir.path().join("out/event.md")).unwrap();
    assert!(md.contains("**Post Type:** `event`"));
}

#[test]
fn export_all_writes_index() {
    let dir = project();
    let output = ignis(dir.path(), &["export-all", "--output", "out"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Exported 2 type definitions to: "));
    assert!(stdout(&output).contains("  - contact.ts\n  - genre.ts\n"));

    let index = std::fs::read_to_string(dir.path().join("out/index.ts")).unwrap();
    assert!(index.ends_with("export * from './contact';\nexport * from './genre';\n"));
}

#[test]
fn export_all_respects_index_setting() {
    let dir = project();
    std::fs::create_dir_all(dir.path().join(".ignis")).unwrap();
    std::fs::write(
        dir.path().join(".ignis/config.toml"),
        "[paths]\ntypescript_output = \"types\"\n\n[typescript]\nindex = false\n",
    )
    .unwrap();

    let output = ignis(dir.path(), &["export-all", "--kind", "post-type"]);
    assert!(output.status.success());
    assert!(dir.path().join("types/contact.ts").exists());
    assert!(!dir.path().join("types/index.ts").exists());
}

#[test]
fn register_prints_json() {
    let dir = project();
    let output = ignis(dir.path(), &["register"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["post_types"]["contact"]["labels"]["name"], "Contacts");
    assert_eq!(
        json["taxonomies"]["genre"]["object_type"],
        serde_json::json!(["contact"])
    );
    assert_eq!(json["field_groups"][0]["key"], "group_contact");
    assert_eq!(json["field_groups"][1]["key"], "group_taxonomy_genre");
    assert!(stderr(&output).contains("Registered 1 post type(s) and 1 taxonomy(ies) with 2 field group(s)"));

    let output = ignis(dir.path(), &["register", "--slug", "missing"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing: schema not found: missing"));
}

#[test]
fn flush_reports() {
    let dir = project();
    let output = ignis(dir.path(), &["flush"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Rewrite rules flushed\n");
}
