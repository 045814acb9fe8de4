/// Filesystem adapters for file I/O operations
mod file_writer;
mod license_file_reader;
mod tree_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use license_file_reader::FileSystemLicenseReader;
pub use tree_reader::FileSystemTreeReader;
