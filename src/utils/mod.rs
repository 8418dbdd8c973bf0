pub mod config;
pub mod formatting;
pub mod logger;
pub mod parsing;

// Re-exports
pub use config::*;
pub use parsing::*;
