use std::fmt;

/// Kind of component as written to the SBOM `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Library,
    Framework,
}

impl ComponentType {
    /// `Framework` iff any keyword equals "framework", ignoring case
    pub fn from_keywords(keywords: &[String]) -> Self {
        if keywords
            .iter()
            .any(|k| k.trim().eq_ignore_ascii_case("framework"))
        {
            ComponentType::Framework
        } else {
            ComponentType::Library
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Library => "library",
            ComponentType::Framework => "framework",
        }
    }
}

/// Digest algorithms accepted from package metadata, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha512,
    Sha384,
    Sha256,
    Sha1,
}

impl HashAlgorithm {
    pub const PRIORITY: [HashAlgorithm; 4] = [
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha1,
    ];

    /// Name used by CycloneDX (`alg` attribute)
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha512 => "SHA-512",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha1 => "SHA-1",
        }
    }

    /// Prefix used in Subresource Integrity strings (`sha512-...`)
    pub fn sri_prefix(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha1 => "sha1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHash {
    pub algorithm: HashAlgorithm,
    pub hex_digest: String,
}

impl ComponentHash {
    pub fn new(algorithm: HashAlgorithm, hex_digest: String) -> Self {
        Self {
            algorithm,
            hex_digest,
        }
    }
}

/// License identity: a known SPDX id, or the raw declared text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseChoice {
    Id(String),
    Name(String),
}

/// Full license text discovered next to the installed package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseText {
    pub content_type: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub choice: LicenseChoice,
    pub text: Option<LicenseText>,
}

impl License {
    pub fn new(choice: LicenseChoice) -> Self {
        Self { choice, text: None }
    }

    pub fn with_text(mut self, text: Option<LicenseText>) -> Self {
        self.text = text;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalReferenceType {
    Website,
    IssueTracker,
    Vcs,
}

impl ExternalReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalReferenceType::Website => "website",
            ExternalReferenceType::IssueTracker => "issue-tracker",
            ExternalReferenceType::Vcs => "vcs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    pub reference_type: ExternalReferenceType,
    pub url: String,
}

/// Component entity: one deduplicated package in the dependency graph
///
/// Identity is the purl. In spartan mode only purl, type, group, name and
/// version are populated; the remaining collections stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub purl: String,
    pub name: String,
    pub group: Option<String>,
    pub version: String,
    pub component_type: ComponentType,
    pub description: Option<String>,
    pub hashes: Vec<ComponentHash>,
    pub licenses: Vec<License>,
    pub external_references: Vec<ExternalReference>,
}

impl Component {
    pub fn new(
        purl: String,
        name: String,
        group: Option<String>,
        version: String,
        component_type: ComponentType,
    ) -> Self {
        Self {
            purl,
            name,
            group,
            version,
            component_type,
            description: None,
            hashes: Vec::new(),
            licenses: Vec::new(),
            external_references: Vec::new(),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{}/{}@{}", group, self.name, self.version),
            None => write!(f, "{}@{}", self.name, self.version),
        }
    }
}
