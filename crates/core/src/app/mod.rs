pub mod pipeline;
pub mod stats;

// Re-exports
pub use pipeline::*;
pub use stats::*;
