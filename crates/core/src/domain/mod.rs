pub mod history;
pub mod movie;
pub mod user;

// Re-exports for convenience
pub use history::*;
pub use movie::*;
pub use user::*;
