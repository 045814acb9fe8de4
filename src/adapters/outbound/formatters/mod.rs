/// Formatter adapters for SBOM documents and audit reports
mod audit_report_formatter;
mod cyclonedx_xml_formatter;
mod responsibility_formatter;

pub use audit_report_formatter::AuditReportFormatter;
pub use cyclonedx_xml_formatter::CycloneDxXmlFormatter;
pub use responsibility_formatter::ResponsibilityFormatter;
