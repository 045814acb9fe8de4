use crate::sbom_generation::domain::SbomMetadata;
use chrono::Utc;
use uuid::Uuid;

/// SbomGenerator service for generating SBOM document metadata
pub struct SbomGenerator;

impl SbomGenerator {
    /// Generates metadata with the current timestamp
    ///
    /// When `with_serial_number` is set, a fresh `urn:uuid:` serial number is
    /// attached so that each generated document is distinguishable.
    pub fn generate_metadata(
        tool_name: &str,
        tool_version: &str,
        with_serial_number: bool,
    ) -> SbomMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let serial_number = with_serial_number.then(|| format!("urn:uuid:{}", Uuid::new_v4()));

        SbomMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            serial_number,
        )
    }

    /// Metadata naming this tool, using the compile-time crate version
    pub fn generate_default_metadata(with_serial_number: bool) -> SbomMetadata {
        Self::generate_metadata(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            with_serial_number,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_metadata() {
        let metadata = SbomGenerator::generate_default_metadata(true);

        assert_eq!(metadata.tool_name(), "sbom-audit");
        assert_eq!(metadata.tool_version(), env!("CARGO_PKG_VERSION"));
        assert!(metadata.serial_number().unwrap().starts_with("urn:uuid:"));
    }

    #[test]
    fn test_generate_metadata_without_serial() {
        let metadata = SbomGenerator::generate_metadata("test-tool", "1.0.0", false);
        assert!(metadata.serial_number().is_none());
    }

    #[test]
    fn test_generate_metadata_timestamp_format() {
        let metadata = SbomGenerator::generate_metadata("test-tool", "1.0.0", false);
        let timestamp = metadata.timestamp();

        // RFC3339 carries 'T' and a zone offset
        assert!(timestamp.contains('T'));
        assert!(timestamp.contains('+') || timestamp.contains('Z'));
    }

    #[test]
    fn test_generate_metadata_unique_serial_numbers() {
        let first = SbomGenerator::generate_metadata("test-tool", "1.0.0", true);
        let second = SbomGenerator::generate_metadata("test-tool", "1.0.0", true);
        assert_ne!(first.serial_number(), second.serial_number());

        let uuid_part = first
            .serial_number()
            .unwrap()
            .strip_prefix("urn:uuid:")
            .unwrap();
        assert_eq!(uuid_part.len(), 36);
    }
}
