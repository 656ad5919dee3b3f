pub mod engine;

pub use engine::{CatalogEngine, EngineState};
