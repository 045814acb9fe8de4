use crate::shared::error::AuditError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a dependency tree document (100 MB)
pub const MAX_TREE_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum size of a license text file that is embedded into the SBOM (1 MB)
pub const MAX_LICENSE_FILE_SIZE: u64 = 1024 * 1024;

/// Reads a file after checking that it is a regular file within `max_size`.
///
/// # Security
/// Uses `symlink_metadata()` so a symbolic link is rejected instead of
/// followed, and refuses oversized files before reading them.
///
/// # Errors
/// Returns `AuditError::FileReadError` if the path is missing, is a symlink,
/// is not a regular file, is too large or cannot be read as UTF-8.
pub fn read_regular_file(path: &Path, max_size: u64) -> Result<String> {
    let read_error = |details: String| AuditError::FileReadError {
        path: path.to_path_buf(),
        details,
    };

    let metadata = fs::symlink_metadata(path)
        .map_err(|e| read_error(format!("Failed to read metadata: {}", e)))?;

    if metadata.is_symlink() {
        return Err(read_error(
            "Security: symbolic links are not allowed".to_string(),
        )
        .into());
    }

    if !metadata.is_file() {
        return Err(read_error("not a regular file".to_string()).into());
    }

    if metadata.len() > max_size {
        return Err(read_error(format!(
            "Security: file is too large ({} bytes). Maximum allowed size is {} bytes.",
            metadata.len(),
            max_size
        ))
        .into());
    }

    fs::read_to_string(path).map_err(|e| read_error(e.to_string()).into())
}
