use crate::sbom_generation::domain::{License, LicenseChoice, LicenseText};
use crate::sbom_generation::domain::raw_node::RawPackageNode;

/// LicensePolicy decides how declared licenses are represented in the SBOM
///
/// A declared value that exactly matches a current or deprecated SPDX
/// identifier becomes `LicenseChoice::Id`; anything else is kept verbatim as
/// `LicenseChoice::Name`.
///
/// Sources, in order:
/// 1. `license` field (string or legacy `{type}` object)
/// 2. legacy `licenses` array or single entry, used only when `license` yields nothing
pub struct LicensePolicy;

impl LicensePolicy {
    /// Classifies a single declared license string
    pub fn classify(declared: &str) -> LicenseChoice {
        match spdx::license_id(declared) {
            Some(id) => LicenseChoice::Id(id.name.to_string()),
            None => LicenseChoice::Name(declared.to_string()),
        }
    }

    /// Collects the licenses declared by a raw node
    ///
    /// The discovered license text, if any, is attached to every license.
    pub fn licenses_for(node: &RawPackageNode, text: Option<LicenseText>) -> Vec<License> {
        let declared: Vec<&str> = match node.license.as_ref().and_then(|l| l.declared()) {
            Some(license) => vec![license],
            None => node.licenses.declared(),
        };

        declared
            .into_iter()
            .map(|d| License::new(Self::classify(d)).with_text(text.clone()))
            .collect()
    }
}
