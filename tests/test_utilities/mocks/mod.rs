#![allow(dead_code, unused_imports)]

/// Mock implementations for testing
mod mock_component_report_repository;
mod mock_license_text_reader;
mod mock_progress_reporter;
mod mock_scan_client;

pub use mock_component_report_repository::MockComponentReportRepository;
pub use mock_license_text_reader::MockLicenseTextReader;
pub use mock_progress_reporter::{MockProgressReporter, ProgressEvent};
pub use mock_scan_client::{MockScanClient, ScriptedStatus};
