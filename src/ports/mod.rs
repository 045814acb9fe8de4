/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven (outbound) ports exist: the use cases are invoked directly by
/// the CLI, and reach the network, the cache and the file system through
/// these traits.
pub mod outbound;
