pub mod prediction;
pub mod store;

pub use prediction::HttpPredictionAdapter;
pub use store::{JsonFileStore, MemoryStore};
