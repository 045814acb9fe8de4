use sbom_audit::prelude::*;
use sbom_audit::sbom_generation::domain::LicenseText;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock LicenseTextReader serving license texts from memory by install path
#[derive(Default)]
pub struct MockLicenseTextReader {
    texts: HashMap<PathBuf, String>,
}

impl MockLicenseTextReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, package_dir: &str, content: &str) -> Self {
        self.texts
            .insert(PathBuf::from(package_dir), content.to_string());
        self
    }
}

impl LicenseTextReader for MockLicenseTextReader {
    fn read_license_text(&self, package_dir: &Path) -> Option<LicenseText> {
        self.texts.get(package_dir).map(|content| LicenseText {
            content_type: "text/plain".to_string(),
            content: content.clone(),
        })
    }
}
