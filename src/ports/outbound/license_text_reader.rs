use crate::sbom_generation::domain::LicenseText;
use std::path::Path;

/// LicenseTextReader port for discovering full license text on disk
///
/// Reading is synchronous: it runs while the graph is being built, which is a
/// pure in-memory traversal otherwise.
pub trait LicenseTextReader {
    /// Looks for a license file inside an installed package directory
    ///
    /// Missing or unreadable files yield `None`; they are never an error.
    fn read_license_text(&self, package_dir: &Path) -> Option<LicenseText>;
}

/// Reader that never finds license text, for trees listed without install paths
pub struct NoLicenseText;

impl LicenseTextReader for NoLicenseText {
    fn read_license_text(&self, _package_dir: &Path) -> Option<LicenseText> {
        None
    }
}
