use crate::sbom_generation::domain::{ComponentHash, HashAlgorithm};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// HashPolicy selects the digests recorded for a component
///
/// Priority order:
/// 1. legacy `_shasum` (a SHA-1 hex digest), exclusively when present
/// 2. every algorithm found in the SRI integrity string, ordered
///    SHA-512, SHA-384, SHA-256, SHA-1
pub struct HashPolicy;

impl HashPolicy {
    pub fn select_hashes(shasum: Option<&str>, integrity: Option<&str>) -> Vec<ComponentHash> {
        if let Some(sha1) = shasum.map(str::trim).filter(|s| !s.is_empty()) {
            return vec![ComponentHash::new(
                HashAlgorithm::Sha1,
                sha1.to_ascii_lowercase(),
            )];
        }

        let Some(integrity) = integrity else {
            return Vec::new();
        };

        HashAlgorithm::PRIORITY
            .iter()
            .filter_map(|algorithm| {
                Self::find_digest(integrity, *algorithm)
                    .map(|hex| ComponentHash::new(*algorithm, hex))
            })
            .collect()
    }

    /// Finds the first entry for `algorithm` in a space-separated SRI list
    /// and returns its digest as lowercase hex
    fn find_digest(integrity: &str, algorithm: HashAlgorithm) -> Option<String> {
        integrity.split_whitespace().find_map(|entry| {
            let (prefix, encoded) = entry.split_once('-')?;
            if prefix != algorithm.sri_prefix() {
                return None;
            }
            // SRI options (`sha512-abc?opt`) are not part of the digest
            let encoded = encoded.split('?').next().unwrap_or(encoded);
            match STANDARD.decode(encoded) {
                Ok(bytes) => Some(to_hex(&bytes)),
                Err(e) => {
                    tracing::debug!("Ignoring malformed {} integrity value: {}", prefix, e);
                    None
                }
            }
        })
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
