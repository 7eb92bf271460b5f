use std::fs;
use std::path::Path;
use std::sync::Arc;

use essex_core::init::{
    configure_manifest, copy_template, init_incomplete_message, init_instructions, Initializer,
    TemplateCopy, SCRIPT_DEFAULTS, TEMPLATES,
};
use essex_core::{Error, LogEntry, MemoryLogger};
use serde_json::{json, Value};
use tempfile::TempDir;

fn write_manifest(dir: &Path, manifest: &Value) {
    fs::write(
        dir.join("package.json"),
        serde_json::to_string_pretty(manifest).unwrap(),
    )
    .unwrap();
}

fn read_manifest(dir: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
}

fn fully_configured() -> Value {
    let mut manifest = json!({ "name": "monorepo", "private": true });
    configure_manifest(&mut manifest).unwrap();
    manifest
}

#[test]
fn test_sets_missing_test_and_lint_scripts_only() {
    let mut manifest = fully_configured();
    let scripts = manifest["scripts"].as_object_mut().unwrap();
    scripts.remove("test");
    scripts.remove("lint");
    scripts.insert("build".to_string(), json!("tsc -b"));
    manifest["custom"] = json!({ "keep": true });

    let changed = configure_manifest(&mut manifest).unwrap();

    assert!(changed);
    assert_eq!(manifest["scripts"]["test"], json!("essex test"));
    assert_eq!(manifest["scripts"]["lint"], json!("essex lint --docs --fix"));
    assert_eq!(manifest["scripts"]["build"], json!("tsc -b"));
    assert_eq!(manifest["custom"], json!({ "keep": true }));
    assert_eq!(manifest["name"], json!("monorepo"));
}

#[test]
fn test_defaults_on_empty_manifest() {
    let mut manifest = json!({});
    assert!(configure_manifest(&mut manifest).unwrap());

    assert_eq!(manifest["prettier"], json!("@essex/prettier-config"));
    assert_eq!(manifest["husky"]["hooks"]["pre-commit"], json!("lint-staged"));
    assert_eq!(manifest["husky"]["hooks"]["commit-msg"], json!("essex commit-msg"));
    assert_eq!(manifest["lint-staged"]["*"], json!(["essex prettify --staged"]));
    assert_eq!(manifest["lint-staged"][".md"], json!(["essex lint --docs-only"]));
    assert_eq!(
        manifest["lint-staged"]["*.{js,jsx,ts,tsx}"],
        json!(["essex lint --fix --staged"])
    );
    for (name, command) in SCRIPT_DEFAULTS {
        assert_eq!(manifest["scripts"][name], json!(command));
    }
    assert_eq!(manifest["scripts"]["ci"], json!("run-s build lint test git_is_clean"));
}

#[test]
fn test_existing_values_are_not_replaced() {
    let mut manifest = json!({
        "prettier": "my-prettier-config",
        "husky": { "hooks": {} },
    });
    configure_manifest(&mut manifest).unwrap();
    assert_eq!(manifest["prettier"], json!("my-prettier-config"));
    assert_eq!(manifest["husky"], json!({ "hooks": {} }));
}

#[test]
fn test_empty_string_counts_as_missing() {
    let mut manifest = fully_configured();
    manifest["scripts"]["ci"] = json!("");
    assert!(configure_manifest(&mut manifest).unwrap());
    assert_eq!(manifest["scripts"]["ci"], json!("run-s build lint test git_is_clean"));
}

#[test]
fn test_second_pass_changes_nothing() {
    let mut manifest = json!({ "name": "monorepo" });
    assert!(configure_manifest(&mut manifest).unwrap());
    let snapshot = manifest.clone();
    assert!(!configure_manifest(&mut manifest).unwrap());
    assert_eq!(manifest, snapshot);
}

#[test]
fn test_manifest_written_once_and_key_order_kept() {
    let temp_dir = TempDir::new().unwrap();
    let mut manifest = fully_configured();
    manifest["scripts"].as_object_mut().unwrap().remove("test");
    manifest["scripts"].as_object_mut().unwrap().remove("lint");
    write_manifest(temp_dir.path(), &manifest);

    let initializer = Initializer::new(temp_dir.path(), Arc::new(MemoryLogger::new()));
    assert!(initializer.patch_manifest().unwrap());

    let written = fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
    let name_pos = written.find("\"name\"").unwrap();
    let scripts_pos = written.find("\"scripts\"").unwrap();
    assert!(name_pos < scripts_pos);
    assert!(written.contains("\n  \"name\": \"monorepo\""));

    let patched = read_manifest(temp_dir.path());
    assert_eq!(patched["scripts"]["test"], json!("essex test"));
    assert_eq!(patched["scripts"]["lint"], json!("essex lint --docs --fix"));

    // a second pass finds everything in place and leaves the file alone
    fs::write(temp_dir.path().join("package.json"), &written).unwrap();
    assert!(!initializer.patch_manifest().unwrap());
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("package.json")).unwrap(),
        written
    );
}

#[test]
fn test_run_twice_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), &json!({ "name": "monorepo" }));

    let logger = Arc::new(MemoryLogger::new());
    let initializer = Initializer::new(temp_dir.path(), logger.clone());

    let first = initializer.run().unwrap();
    assert!(first.manifest_written);
    assert_eq!(first.count, 0);
    assert_eq!(first.copied.len(), TEMPLATES.len());

    let after_first = fs::read_to_string(temp_dir.path().join("package.json")).unwrap();

    let second = initializer.run().unwrap();
    assert!(!second.manifest_written);
    assert_eq!(second.count, TEMPLATES.len());
    assert!(second.copied.is_empty());
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("package.json")).unwrap(),
        after_first
    );
}

#[test]
fn test_templates_copied_only_when_absent() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), &fully_configured());
    fs::write(temp_dir.path().join(".gitignore"), "custom\n").unwrap();

    let logger = Arc::new(MemoryLogger::new());
    let summary = Initializer::new(temp_dir.path(), logger.clone()).run().unwrap();

    assert!(!summary.manifest_written);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.skipped, vec![".gitignore"]);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(".gitignore")).unwrap(),
        "custom\n"
    );
    for name in [".docsrc", ".prettierignore", "tsconfig.json"] {
        assert!(temp_dir.path().join(name).is_file(), "{} missing", name);
    }

    let entries = logger.entries();
    assert_eq!(entries.last(), Some(&LogEntry::Info(init_incomplete_message())));
}

#[test]
fn test_instructions_logged_when_everything_copied() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), &json!({}));

    let logger = Arc::new(MemoryLogger::new());
    Initializer::new(temp_dir.path(), logger.clone()).run().unwrap();

    let entries = logger.entries();
    assert_eq!(entries.last(), Some(&LogEntry::Info(init_instructions())));
    assert!(entries
        .iter()
        .any(|e| matches!(e, LogEntry::Info(m) if m.contains("yarn add --dev -W lerna"))));
}

#[test]
fn test_copy_template_counts() {
    let temp_dir = TempDir::new().unwrap();
    let template = &TEMPLATES[3];

    let first = copy_template(temp_dir.path(), template).unwrap();
    assert_eq!(first, TemplateCopy::Copied);
    assert_eq!(first.count(), 0);

    let second = copy_template(temp_dir.path(), template).unwrap();
    assert_eq!(second, TemplateCopy::AlreadyExists);
    assert_eq!(second.count(), 1);
}

#[test]
fn test_packaged_tsconfig_is_valid_json() {
    let tsconfig = TEMPLATES.iter().find(|t| t.name == "tsconfig.json").unwrap();
    let value: Value = serde_json::from_str(tsconfig.contents).unwrap();
    assert!(value["compilerOptions"].is_object());
}

#[test]
fn test_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let result = Initializer::new(temp_dir.path(), Arc::new(MemoryLogger::new())).run();
    assert!(matches!(result, Err(Error::ManifestNotFound(_))));
}

#[test]
fn test_malformed_manifest_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), "{ not json").unwrap();
    let result = Initializer::new(temp_dir.path(), Arc::new(MemoryLogger::new())).patch_manifest();
    match result {
        Err(Error::InvalidManifest { path, .. }) => {
            assert_eq!(path, temp_dir.path().join("package.json"))
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
