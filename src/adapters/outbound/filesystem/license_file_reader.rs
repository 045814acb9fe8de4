use crate::ports::outbound::LicenseTextReader;
use crate::sbom_generation::domain::LicenseText;
use crate::shared::security::{read_regular_file, MAX_LICENSE_FILE_SIZE};
use std::path::Path;

const BASE_NAMES: [&str; 4] = ["LICENSE", "LICENCE", "COPYING", "NOTICE"];
const EXTENSIONS: [&str; 5] = ["", ".txt", ".md", ".markdown", ".rst"];

/// FileSystemLicenseReader adapter scanning a package directory for a
/// license file
///
/// Candidates are tried in a fixed order: each base name in upper,
/// capitalized and lower case, each with every extension. The first file
/// that reads successfully wins.
pub struct FileSystemLicenseReader;

impl FileSystemLicenseReader {
    pub fn new() -> Self {
        Self
    }

    fn candidates() -> Vec<String> {
        let mut names = Vec::new();
        for base in BASE_NAMES {
            let capitalized = format!("{}{}", &base[..1], base[1..].to_lowercase());
            for variant in [base.to_string(), capitalized, base.to_lowercase()] {
                for extension in EXTENSIONS {
                    names.push(format!("{}{}", variant, extension));
                }
            }
        }
        names
    }

    fn content_type(file_name: &str) -> &'static str {
        if file_name.ends_with(".md") || file_name.ends_with(".markdown") {
            "text/markdown"
        } else {
            "text/plain"
        }
    }
}

impl Default for FileSystemLicenseReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseTextReader for FileSystemLicenseReader {
    fn read_license_text(&self, package_dir: &Path) -> Option<LicenseText> {
        Self::candidates().into_iter().find_map(|name| {
            let path = package_dir.join(&name);
            if !path.is_file() {
                return None;
            }
            match read_regular_file(&path, MAX_LICENSE_FILE_SIZE) {
                Ok(content) => Some(LicenseText {
                    content_type: Self::content_type(&name).to_string(),
                    content,
                }),
                Err(e) => {
                    tracing::debug!("Ignoring unreadable license file {}: {}", path.display(), e);
                    None
                }
            }
        })
    }
}
