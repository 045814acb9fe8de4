use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate value object: the canonical identity of a package
///
/// A coordinate is immutable once built. The optional group holds the npm
/// scope including its leading `@` (e.g. `@babel`), exactly as it appears in
/// the package name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    name: String,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
}

impl Coordinate {
    pub fn new(name: String, version: String, group: Option<String>) -> Self {
        Self {
            name,
            version,
            group: group.filter(|g| !g.is_empty()),
        }
    }

    /// Builds a coordinate from a raw package name such as `@scope/pkg`
    pub fn from_package_name(raw_name: &str, version: &str) -> Self {
        let (group, name) = split_scoped_name(raw_name);
        Self::new(name, version.to_string(), group)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Renders the package URL for the given ecosystem
    ///
    /// `pkg:<ecosystem>/<group>/<name>@<version>`; the group segment is
    /// omitted when absent and percent-encoded otherwise, so `@scope`
    /// becomes `%40scope`.
    pub fn to_purl(&self, ecosystem: &str) -> String {
        let name = urlencoding::encode(&self.name);
        match self.group.as_deref() {
            Some(group) => format!(
                "pkg:{}/{}/{}@{}",
                ecosystem,
                urlencoding::encode(group),
                name,
                self.version
            ),
            None => format!("pkg:{}/{}@{}", ecosystem, name, self.version),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{}/{}@{}", group, self.name, self.version),
            None => write!(f, "{}@{}", self.name, self.version),
        }
    }
}

/// Splits `@scope/name` into `(Some("@scope"), "name")`
///
/// Anything that does not follow the scope convention comes back unchanged
/// as the name with no group.
pub fn split_scoped_name(raw_name: &str) -> (Option<String>, String) {
    if raw_name.starts_with('@') {
        if let Some((scope, name)) = raw_name.split_once('/') {
            if scope.len() > 1 && !name.is_empty() && !name.contains('/') {
                return (Some(scope.to_string()), name.to_string());
            }
        }
    }
    (None, raw_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_purl_without_group() {
        let coordinate = Coordinate::new("lodash".to_string(), "4.17.21".to_string(), None);
        assert_eq!(coordinate.to_purl("npm"), "pkg:npm/lodash@4.17.21");
    }

    #[test]
    fn test_to_purl_encodes_scope() {
        let coordinate = Coordinate::new(
            "foo".to_string(),
            "1.0.0".to_string(),
            Some("@scope".to_string()),
        );
        assert_eq!(coordinate.to_purl("npm"), "pkg:npm/%40scope/foo@1.0.0");
    }

    #[test]
    fn test_to_purl_uses_ecosystem() {
        let coordinate = Coordinate::new("jquery".to_string(), "3.5.0".to_string(), None);
        assert_eq!(coordinate.to_purl("bower"), "pkg:bower/jquery@3.5.0");
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let coordinate = Coordinate::new("a".to_string(), "1.0.0".to_string(), Some(String::new()));
        assert_eq!(coordinate.group(), None);
        assert_eq!(coordinate.to_purl("npm"), "pkg:npm/a@1.0.0");
    }

    #[test]
    fn test_from_package_name_scoped() {
        let coordinate = Coordinate::from_package_name("@babel/core", "7.22.0");
        assert_eq!(coordinate.group(), Some("@babel"));
        assert_eq!(coordinate.name(), "core");
        assert_eq!(coordinate.to_purl("npm"), "pkg:npm/%40babel/core@7.22.0");
    }

    #[test]
    fn test_split_scoped_name_falls_back_to_raw() {
        assert_eq!(split_scoped_name("express"), (None, "express".to_string()));
        assert_eq!(split_scoped_name("@broken"), (None, "@broken".to_string()));
        assert_eq!(split_scoped_name("@/name"), (None, "@/name".to_string()));
        assert_eq!(split_scoped_name("@a/b/c"), (None, "@a/b/c".to_string()));
    }

    #[test]
    fn test_display() {
        let scoped = Coordinate::from_package_name("@types/node", "20.1.0");
        assert_eq!(format!("{}", scoped), "@types/node@20.1.0");
        let plain = Coordinate::from_package_name("chalk", "5.3.0");
        assert_eq!(format!("{}", plain), "chalk@5.3.0");
    }

    #[test]
    fn test_serde_roundtrip_skips_missing_group() {
        let coordinate = Coordinate::from_package_name("chalk", "5.3.0");
        let json = serde_json::to_string(&coordinate).unwrap();
        assert!(!json.contains("group"));
        let parsed: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, coordinate);
    }
}
