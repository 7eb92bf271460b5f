//! Packages exempt from the license compliance check.

use serde::{Deserialize, Serialize};

use crate::config::LicenseSettings;

/// Packages that are always exempt.
pub const DEFAULT_ALLOWED_PACKAGES: [&str; 2] = ["memfs", "fs-monkey"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedPackage {
    pub name: String,
}

/// Allow-list in the shape the license checker reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseAllowList {
    pub allowed_packages: Vec<AllowedPackage>,
}

impl Default for LicenseAllowList {
    fn default() -> Self {
        Self {
            allowed_packages: DEFAULT_ALLOWED_PACKAGES
                .iter()
                .map(|name| AllowedPackage {
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

impl LicenseAllowList {
    /// Defaults plus the packages listed in `essex.toml`, without duplicates.
    pub fn from_settings(settings: &LicenseSettings) -> Self {
        let mut list = Self::default();
        for name in &settings.allowed_packages {
            if !list.is_allowed(name) {
                list.allowed_packages.push(AllowedPackage { name: name.clone() });
            }
        }
        list
    }

    pub fn is_allowed(&self, package: &str) -> bool {
        self.allowed_packages.iter().any(|p| p.name == package)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.allowed_packages.iter().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_extras() {
        let settings = LicenseSettings {
            allowed_packages: vec!["memfs".to_string(), "left-pad".to_string()],
        };
        let list = LicenseAllowList::from_settings(&settings);
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["memfs", "fs-monkey", "left-pad"]);
        assert!(list.is_allowed("fs-monkey"));
        assert!(!list.is_allowed("react"));
    }

    #[test]
    fn serializes_in_checker_shape() {
        let json = serde_json::to_value(LicenseAllowList::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "allowedPackages": [{ "name": "memfs" }, { "name": "fs-monkey" }] })
        );
    }
}
