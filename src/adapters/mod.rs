/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: HTTP clients, cache
/// stores, file system access, formatters and console output.
pub mod outbound;
