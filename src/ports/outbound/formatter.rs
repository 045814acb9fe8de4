use crate::sbom_generation::domain::{ComponentGraph, SbomMetadata};
use crate::shared::Result;

/// SbomFormatter port for serializing a component graph into an SBOM document
pub trait SbomFormatter {
    /// Formats the graph with the given document metadata
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, graph: &ComponentGraph, metadata: &SbomMetadata) -> Result<String>;
}
