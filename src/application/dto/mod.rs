/// Data Transfer Objects for application layer
///
/// DTOs carry requests and results between the use cases and the CLI,
/// keeping the domain layer isolated.
mod audit_response;
mod output_format;
mod sbom_request;
mod sbom_response;

pub use audit_response::{AuditResponse, ComponentResponsibility};
pub use output_format::OutputFormat;
pub use sbom_request::SbomRequest;
pub use sbom_response::SbomResponse;
