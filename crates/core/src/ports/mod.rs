pub mod persistence;
pub mod settings;
pub mod source;
pub mod time;

// Re-exports
pub use persistence::*;
pub use settings::*;
pub use source::*;
pub use time::*;
