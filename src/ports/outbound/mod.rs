/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (vulnerability database, scan server,
/// cache store, file system, console).
pub mod cache_store;
pub mod component_report_repository;
pub mod formatter;
pub mod license_text_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod scan_client;

pub use cache_store::CacheStore;
pub use component_report_repository::ComponentReportRepository;
pub use formatter::SbomFormatter;
pub use license_text_reader::{LicenseTextReader, NoLicenseText};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use scan_client::{ScanClient, ScanStatus};
