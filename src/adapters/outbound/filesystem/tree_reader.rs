use crate::sbom_generation::domain::RawPackageNode;
use crate::shared::error::AuditError;
use crate::shared::security::{read_regular_file, MAX_TREE_FILE_SIZE};
use crate::shared::Result;
use std::path::Path;

/// FileSystemTreeReader adapter for reading an installed-package tree
///
/// The input is the JSON written by the package manager's listing command
/// (for npm: `npm ls --json --long`).
pub struct FileSystemTreeReader;

impl FileSystemTreeReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_tree(&self, path: &Path) -> Result<RawPackageNode> {
        let content = read_regular_file(path, MAX_TREE_FILE_SIZE)?;
        RawPackageNode::from_json(&content).map_err(|e| {
            AuditError::FileReadError {
                path: path.to_path_buf(),
                details: format!("not a valid dependency tree: {}", e),
            }
            .into()
        })
    }
}

impl Default for FileSystemTreeReader {
    fn default() -> Self {
        Self::new()
    }
}
