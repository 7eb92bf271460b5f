//! Monorepo bootstrapping: standard `package.json` entries and template
//! configuration files.
//!
//! Every change is applied only when the target is missing, so running the
//! initializer again is a no-op.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::logger::TaskLogger;

pub const MANIFEST_FILE: &str = "package.json";

/// A configuration file shipped with the tool.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub contents: &'static str,
}

pub const TEMPLATES: [Template; 4] = [
    Template {
        name: ".docsrc",
        contents: include_str!("../templates/docsrc"),
    },
    Template {
        name: ".gitignore",
        contents: include_str!("../templates/gitignore"),
    },
    Template {
        name: ".prettierignore",
        contents: include_str!("../templates/prettierignore"),
    },
    Template {
        name: "tsconfig.json",
        contents: include_str!("../templates/tsconfig.json"),
    },
];

pub const RECIPES: &str = r#"  "scripts": {
    "build": "essex webpack",
    "start": "essex webpack --mode development",
    "test": "essex test",
    "lint": "essex lint --docs --fix",
    "lint:ci": "essex lint --strict",
    "prettify": "essex prettify",
    "docs": "essex docs"
  }"#;

pub const PEER_DEPENDENCIES_MSG: &str = "You should install these recommended peer dependencies

    yarn add --dev -W lerna npm-run-all husky lint-staged commitlint";

pub fn init_instructions() -> String {
    format!(
        "To utilize the essex build system, you should define scripts in your package.json file that utilize the build system. Here are some examples:\n\n{}\n",
        RECIPES
    )
}

pub fn init_incomplete_message() -> String {
    format!(
        "Not all configuration has been copied to the target location, as it already exists.\nCheck the logs for more details.\n\n{}",
        init_instructions()
    )
}

/// Mirrors JavaScript truthiness: missing, `null`, `false`, `0` and `""` are unset.
fn is_unset(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

fn set_if_unset(map: &mut Map<String, Value>, key: &str, default: Value) -> bool {
    if is_unset(map.get(key)) {
        map.insert(key.to_string(), default);
        true
    } else {
        false
    }
}

fn manifest_defaults() -> [(&'static str, Value); 3] {
    [
        ("prettier", json!("@essex/prettier-config")),
        (
            "husky",
            json!({
                "hooks": {
                    "pre-commit": "lint-staged",
                    "commit-msg": "essex commit-msg",
                }
            }),
        ),
        (
            "lint-staged",
            json!({
                "*": ["essex prettify --staged"],
                ".md": ["essex lint --docs-only"],
                "*.{js,jsx,ts,tsx}": ["essex lint --fix --staged"],
            }),
        ),
    ]
}

pub const SCRIPT_DEFAULTS: [(&str, &str); 7] = [
    ("build", "lerna run build --stream"),
    ("clean", "lerna run clean --stream --parallel"),
    ("start", "lerna run start --stream --parallel"),
    ("test", "essex test"),
    ("lint", "essex lint --docs --fix"),
    ("git_is_clean", "essex git-is-clean"),
    ("ci", "run-s build lint test git_is_clean"),
];

/// Fills in the standard entries that are missing. Returns whether anything changed.
pub fn configure_manifest(manifest: &mut Value) -> Result<bool> {
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| Error::InvalidManifest {
            path: PathBuf::from(MANIFEST_FILE),
            message: "expected a JSON object".to_string(),
        })?;

    let mut write_needed = false;
    for (key, default) in manifest_defaults() {
        write_needed |= set_if_unset(root, key, default);
    }

    if is_unset(root.get("scripts")) {
        root.insert("scripts".to_string(), Value::Object(Map::new()));
    }
    let scripts = root
        .get_mut("scripts")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::InvalidManifest {
            path: PathBuf::from(MANIFEST_FILE),
            message: "\"scripts\" must be an object".to_string(),
        })?;
    for (name, command) in SCRIPT_DEFAULTS {
        write_needed |= set_if_unset(scripts, name, json!(command));
    }

    Ok(write_needed)
}

/// Result of a single template copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCopy {
    Copied,
    AlreadyExists,
}

impl TemplateCopy {
    /// Contribution to the initializer's combined count.
    pub fn count(&self) -> usize {
        match self {
            TemplateCopy::Copied => 0,
            TemplateCopy::AlreadyExists => 1,
        }
    }
}

/// Writes `template` into `dir` unless a file of that name exists.
pub fn copy_template(dir: &Path, template: &Template) -> Result<TemplateCopy> {
    let target = dir.join(template.name);
    if target.exists() {
        return Ok(TemplateCopy::AlreadyExists);
    }
    fs::write(&target, template.contents)?;
    Ok(TemplateCopy::Copied)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitSummary {
    pub manifest_written: bool,
    pub copied: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    /// Combined count; non-zero means some templates were left untouched.
    pub count: usize,
}

/// Bootstraps a monorepo root.
pub struct Initializer {
    root: PathBuf,
    logger: Arc<dyn TaskLogger>,
}

impl Initializer {
    pub fn new(root: impl Into<PathBuf>, logger: Arc<dyn TaskLogger>) -> Self {
        Self {
            root: root.into(),
            logger,
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Patches the manifest, writing it back only when something changed.
    pub fn patch_manifest(&self) -> Result<bool> {
        let path = self.manifest_path();
        if !path.is_file() {
            return Err(Error::ManifestNotFound(path));
        }
        let content = fs::read_to_string(&path)?;
        let mut manifest: Value =
            serde_json::from_str(&content).map_err(|e| Error::InvalidManifest {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let write_needed = configure_manifest(&mut manifest).map_err(|e| match e {
            Error::InvalidManifest { message, .. } => Error::InvalidManifest {
                path: path.clone(),
                message,
            },
            other => other,
        })?;

        if write_needed {
            let mut pretty = serde_json::to_string_pretty(&manifest)?;
            pretty.push('\n');
            fs::write(&path, pretty)?;
            tracing::info!("updated {}", path.display());
        } else {
            tracing::debug!("{} already configured", path.display());
        }
        Ok(write_needed)
    }

    pub fn run(&self) -> Result<InitSummary> {
        let mut summary = InitSummary {
            manifest_written: self.patch_manifest()?,
            ..Default::default()
        };
        self.logger.info(PEER_DEPENDENCIES_MSG);

        for template in &TEMPLATES {
            let copy = copy_template(&self.root, template)?;
            match copy {
                TemplateCopy::Copied => {
                    tracing::info!("copied {}", template.name);
                    summary.copied.push(template.name);
                }
                TemplateCopy::AlreadyExists => {
                    self.logger.info(&format!(
                        "{} already exists, skipping",
                        template.name
                    ));
                    summary.skipped.push(template.name);
                }
            }
            summary.count += copy.count();
        }

        if summary.count > 0 {
            self.logger.info(&init_incomplete_message());
        } else {
            self.logger.info(&init_instructions());
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values_are_unset() {
        assert!(is_unset(None));
        assert!(is_unset(Some(&Value::Null)));
        assert!(is_unset(Some(&json!(""))));
        assert!(is_unset(Some(&json!(false))));
        assert!(is_unset(Some(&json!(0))));
        assert!(!is_unset(Some(&json!("x"))));
        assert!(!is_unset(Some(&json!({}))));
        assert!(!is_unset(Some(&json!([]))));
    }

    #[test]
    fn non_object_manifest_is_rejected() {
        let mut manifest = json!([1, 2]);
        assert!(matches!(
            configure_manifest(&mut manifest),
            Err(Error::InvalidManifest { .. })
        ));
    }

    #[test]
    fn string_scripts_are_rejected() {
        let mut manifest = json!({ "scripts": "build" });
        assert!(configure_manifest(&mut manifest).is_err());
    }
}
