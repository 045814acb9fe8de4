use crate::sbom_generation::domain::raw_node::RawPackageNode;
use crate::sbom_generation::domain::{ExternalReference, ExternalReferenceType};
use reqwest::Url;

/// ReferencePolicy turns homepage/bugs/repository fields into external
/// references, dropping any URL that does not parse as an absolute URL
pub struct ReferencePolicy;

impl ReferencePolicy {
    pub fn references_for(node: &RawPackageNode) -> Vec<ExternalReference> {
        let candidates = [
            (ExternalReferenceType::Website, node.homepage.as_deref()),
            (
                ExternalReferenceType::IssueTracker,
                node.bugs.as_ref().and_then(|b| b.url()),
            ),
            (
                ExternalReferenceType::Vcs,
                node.repository.as_ref().and_then(|r| r.url()),
            ),
        ];

        candidates
            .into_iter()
            .filter_map(|(reference_type, url)| {
                let url = url?.trim();
                if Self::is_valid_url(url) {
                    Some(ExternalReference {
                        reference_type,
                        url: url.to_string(),
                    })
                } else {
                    tracing::warn!(
                        "Dropping invalid {} URL '{}'",
                        reference_type.as_str(),
                        url
                    );
                    None
                }
            })
            .collect()
    }

    /// Absolute URLs only; relative paths and shorthand like `github:user/repo`
    /// without a host are rejected
    pub fn is_valid_url(url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => !parsed.cannot_be_a_base(),
            Err(_) => false,
        }
    }
}
