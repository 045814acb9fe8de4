/// Application layer - Use cases and DTOs
///
/// This layer orchestrates graph construction, the cached vulnerability
/// lookup and scan polling, talking to infrastructure only through ports.
pub mod dto;
pub mod use_cases;
