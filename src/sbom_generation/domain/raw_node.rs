use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Deepest dependency nesting accepted by [`RawPackageNode::from_json`]
pub const MAX_TREE_DEPTH: usize = 128;

/// JSON nesting allowed per dependency level (the `dependencies` object and
/// the node object), plus slack for object-valued fields of the deepest node
const JSON_LEVELS_PER_DEPENDENCY: usize = 2;
const JSON_NESTING_SLACK: usize = 4;

/// One node of the nested installed-package tree handed over by the package
/// manager listing (npm `ls --json --long` / read-installed shape)
///
/// Every field is optional and lenient: the listing omits fields freely, and
/// a field of an unexpected shape reads as absent instead of rejecting the
/// node. Nodes are validated when the Graph Builder visits them rather than
/// when parsed. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPackageNode {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "dependency_map")]
    pub dependencies: IndexMap<String, RawDependency>,
    #[serde(default, deserialize_with = "lenient")]
    pub extraneous: bool,
    #[serde(default)]
    pub license: Option<RawLicense>,
    /// Legacy `licenses` field, a `[{type, url}]` array or a single entry
    #[serde(default)]
    pub licenses: RawLicenses,
    #[serde(default, rename = "_shasum", deserialize_with = "lenient")]
    pub shasum: Option<String>,
    #[serde(default, rename = "_integrity", deserialize_with = "lenient")]
    pub installed_integrity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub integrity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub homepage: Option<String>,
    #[serde(default)]
    pub bugs: Option<RawUrlField>,
    #[serde(default)]
    pub repository: Option<RawUrlField>,
    #[serde(default)]
    pub keywords: RawKeywords,
    /// Install directory, used to look for license files
    #[serde(default, deserialize_with = "lenient")]
    pub path: Option<PathBuf>,
}

impl RawPackageNode {
    /// Parses a tree from the JSON emitted by the package-manager listing
    ///
    /// # Errors
    /// Fails if the document is not JSON, its top level is not an object, or
    /// it nests more than [`MAX_TREE_DEPTH`] dependency levels.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        if !content.trim_start().starts_with('{') {
            return Err(de::Error::custom("expected a JSON object at the top level"));
        }

        let limit = MAX_TREE_DEPTH * JSON_LEVELS_PER_DEPENDENCY + JSON_NESTING_SLACK;
        if json_nesting_depth(content) > limit {
            return Err(de::Error::custom(format!(
                "dependencies nest deeper than {} levels",
                MAX_TREE_DEPTH
            )));
        }

        // Nesting is bounded above, so the parser's own limit is lifted
        let mut deserializer = serde_json::Deserializer::from_str(content);
        deserializer.disable_recursion_limit();
        let node = Self::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(node)
    }

    /// Name of the node, falling back to the key it was listed under
    pub fn resolve_name<'a>(&'a self, key: Option<&'a str>) -> Option<&'a str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or_else(|| key.map(str::trim).filter(|k| !k.is_empty()))
    }

    pub fn resolve_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// SRI integrity string, preferring the installed `_integrity` field
    pub fn integrity(&self) -> Option<&str> {
        self.installed_integrity
            .as_deref()
            .or(self.integrity.as_deref())
    }
}

/// Value of a `dependencies` entry
///
/// A string placeholder marks an edge that closes a cycle back to a node
/// already listed higher up; it carries no subtree. Any other non-object
/// value is kept as `Malformed` with the JSON kind that was found.
#[derive(Debug, Clone)]
pub enum RawDependency {
    Node(Box<RawPackageNode>),
    Placeholder(String),
    Malformed(&'static str),
}

impl<'de> Deserialize<'de> for RawDependency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DependencyVisitor)
    }
}

struct DependencyVisitor;

impl<'de> Visitor<'de> for DependencyVisitor {
    type Value = RawDependency;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a package object or a version placeholder")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        RawPackageNode::deserialize(de::value::MapAccessDeserializer::new(map))
            .map(|node| RawDependency::Node(Box::new(node)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawDependency::Placeholder(v.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawDependency::Malformed("array"))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(RawDependency::Malformed("boolean"))
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(RawDependency::Malformed("number"))
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(RawDependency::Malformed("number"))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(RawDependency::Malformed("number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawDependency::Malformed("null"))
    }
}

/// `dependencies` must be an object; any other shape reads as no dependencies
fn dependency_map<'de, D>(deserializer: D) -> Result<IndexMap<String, RawDependency>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DependencyMapVisitor;

    impl<'de> Visitor<'de> for DependencyMapVisitor {
        type Value = IndexMap<String, RawDependency>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of dependencies")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut dependencies = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, RawDependency>()? {
                dependencies.insert(key, value);
            }
            Ok(dependencies)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            tracing::warn!("Ignoring 'dependencies' given as an array");
            Ok(IndexMap::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(IndexMap::new())
        }

        fn visit_str<E: de::Error>(self, _v: &str) -> Result<Self::Value, E> {
            tracing::warn!("Ignoring 'dependencies' given as a string");
            Ok(IndexMap::new())
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
            tracing::warn!("Ignoring 'dependencies' given as a boolean");
            Ok(IndexMap::new())
        }

        fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
            tracing::warn!("Ignoring 'dependencies' given as a number");
            Ok(IndexMap::new())
        }

        fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
            tracing::warn!("Ignoring 'dependencies' given as a number");
            Ok(IndexMap::new())
        }

        fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
            tracing::warn!("Ignoring 'dependencies' given as a number");
            Ok(IndexMap::new())
        }
    }

    deserializer.deserialize_any(DependencyMapVisitor)
}

/// Reads a field, falling back to its default when the shape does not match
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        tracing::debug!("Ignoring malformed field: {}", e);
        T::default()
    }))
}

/// Deepest object/array nesting in a JSON text, ignoring brackets in strings
fn json_nesting_depth(content: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in content.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

/// `license` is either an SPDX-ish string or a legacy `{type, url}` object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLicense {
    Text(String),
    Typed {
        #[serde(rename = "type", default)]
        license_type: Option<String>,
    },
    Other(serde_json::Value),
}

impl RawLicense {
    pub fn declared(&self) -> Option<&str> {
        match self {
            RawLicense::Text(text) => Some(text.as_str()),
            RawLicense::Typed { license_type } => license_type.as_deref(),
            RawLicense::Other(_) => None,
        }
        .map(str::trim)
        .filter(|l| !l.is_empty())
    }
}

/// Legacy `licenses` field: usually an array, sometimes a single entry
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLicenses {
    List(Vec<RawLicense>),
    Single(RawLicense),
}

impl Default for RawLicenses {
    fn default() -> Self {
        RawLicenses::List(Vec::new())
    }
}

impl RawLicenses {
    pub fn declared(&self) -> Vec<&str> {
        match self {
            RawLicenses::List(list) => list.iter().filter_map(RawLicense::declared).collect(),
            RawLicenses::Single(single) => single.declared().into_iter().collect(),
        }
    }
}

/// `bugs` and `repository` are either a bare URL or an object with `url`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawUrlField {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
    Other(serde_json::Value),
}

impl RawUrlField {
    pub fn url(&self) -> Option<&str> {
        match self {
            RawUrlField::Url(url) => Some(url.as_str()),
            RawUrlField::Object { url } => url.as_deref(),
            RawUrlField::Other(_) => None,
        }
    }
}

/// `keywords` should be a list, but some manifests use a single string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawKeywords {
    List(Vec<String>),
    Single(String),
    Other(serde_json::Value),
}

impl Default for RawKeywords {
    fn default() -> Self {
        RawKeywords::List(Vec::new())
    }
}

impl RawKeywords {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            RawKeywords::List(list) => list.clone(),
            RawKeywords::Single(single) => single
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
            RawKeywords::Other(_) => Vec::new(),
        }
    }
}
