/// Crate-wide result alias.
///
/// Errors travel as `anyhow::Error`; typed failures are wrapped `AuditError`
/// values that callers can recover with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
