/// Domain layer - graph model, pure services and policies
///
/// Nothing in here performs I/O; license text discovery is reached only
/// through the `LicenseTextReader` port.
pub mod domain;
pub mod policies;
pub mod services;
