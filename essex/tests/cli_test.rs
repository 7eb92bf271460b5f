use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_essex(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_essex"))
        .arg("--cwd")
        .arg(cwd)
        .args(args)
        .output()
        .unwrap()
}

fn write_config(dir: &Path, eslint: &str, pretty_quick: &str) {
    fs::write(
        dir.join("essex.toml"),
        format!(
            r#"
[tools]
eslint = ["{}"]
pretty_quick = ["{}"]
docs = [["true"]]
"#,
            eslint, pretty_quick
        ),
    )
    .unwrap();
}

#[test]
fn test_init_command() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), r#"{"name": "mono"}"#).unwrap();

    let output = run_essex(temp_dir.path(), &["init"]);
    assert!(output.status.success());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["scripts"]["test"], "essex test");
    assert!(temp_dir.path().join("tsconfig.json").is_file());
    assert!(temp_dir.path().join(".gitignore").is_file());
}

#[test]
fn test_init_without_manifest_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_essex(temp_dir.path(), &["init"]);
    assert!(!output.status.success());
}

#[test]
fn test_licenses_json() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_essex(temp_dir.path(), &["licenses", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["allowedPackages"][0]["name"], "memfs");
    assert_eq!(value["allowedPackages"][1]["name"], "fs-monkey");
}

#[test]
fn test_eslint_config_written_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join(".eslintrc.json");
    let output = run_essex(
        temp_dir.path(),
        &["eslint-config", "--out", out.to_str().unwrap()],
    );
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["overrides"].as_array().unwrap().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_lint_passes_when_tools_pass() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "true", "true");

    let output = run_essex(temp_dir.path(), &["lint", "--docs"]);
    assert!(output.status.success());
}

#[cfg(unix)]
#[test]
fn test_lint_exits_non_zero_when_a_check_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "false", "true");

    let output = run_essex(temp_dir.path(), &["lint"]);
    assert_eq!(output.status.code(), Some(1));
}

#[cfg(unix)]
#[test]
fn test_lint_docs_only_runs_only_docs() {
    let temp_dir = TempDir::new().unwrap();
    // a failing linter must not be invoked
    write_config(temp_dir.path(), "false", "false");

    let output = run_essex(temp_dir.path(), &["lint", "--docs-only"]);
    assert!(output.status.success());
}

#[test]
fn test_lint_docs_only_conflicts_with_fix() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_essex(temp_dir.path(), &["lint", "--docs-only", "--fix"]);
    assert!(!output.status.success());
}

#[cfg(unix)]
#[test]
fn test_test_command_forwards_arguments() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("essex.toml"),
        r#"
[tools]
test = ["sh", "-c", "test \"$1\" = --coverage", "sh"]
"#,
    )
    .unwrap();

    let output = run_essex(temp_dir.path(), &["test", "--coverage"]);
    assert!(output.status.success());

    let output = run_essex(temp_dir.path(), &["test", "--watch"]);
    assert_eq!(output.status.code(), Some(1));
}

#[cfg(unix)]
#[test]
fn test_git_is_clean_reports_changed_paths() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("essex.toml"),
        r#"
[tools]
git = ["sh", "-c", "echo ' M src/index.ts'", "sh"]
"#,
    )
    .unwrap();

    let output = run_essex(temp_dir.path(), &["git-is-clean"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("src/index.ts"));
}

#[cfg(unix)]
#[test]
fn test_git_is_clean_passes_on_empty_status() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("essex.toml"),
        "[tools]\ngit = [\"true\"]\n",
    )
    .unwrap();

    let output = run_essex(temp_dir.path(), &["git-is-clean"]);
    assert!(output.status.success());
}

#[test]
fn test_init_scripts_name_existing_commands() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
    assert!(run_essex(temp_dir.path(), &["init"]).status.success());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("package.json")).unwrap())
            .unwrap();
    let mut commands: Vec<String> = manifest["scripts"]
        .as_object()
        .unwrap()
        .values()
        .chain(manifest["husky"]["hooks"].as_object().unwrap().values())
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    for entries in manifest["lint-staged"].as_object().unwrap().values() {
        commands.extend(entries.as_array().unwrap().iter().map(|v| v.as_str().unwrap().to_string()));
    }

    for command in commands.iter().filter(|c| c.starts_with("essex ")) {
        let mut args: Vec<&str> = command.split_whitespace().skip(1).collect();
        args.push("--help");
        let output = run_essex(temp_dir.path(), &args);
        assert!(output.status.success(), "`{}` is not a valid command", command);
    }
}
