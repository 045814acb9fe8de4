use crate::sbom_generation::domain::{ComponentGraph, SbomMetadata};

/// SbomResponse - the built graph together with its serialized document
///
/// The graph stays available for the vulnerability lookup and for
/// responsibility attribution.
#[derive(Debug, Clone)]
pub struct SbomResponse {
    pub graph: ComponentGraph,
    pub metadata: SbomMetadata,
    pub document: String,
}

impl SbomResponse {
    pub fn new(graph: ComponentGraph, metadata: SbomMetadata, document: String) -> Self {
        Self {
            graph,
            metadata,
            document,
        }
    }
}
