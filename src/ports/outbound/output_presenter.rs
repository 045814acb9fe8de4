use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// Abstracts where a rendered document (SBOM XML, audit JSON) ends up.
pub trait OutputPresenter {
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
