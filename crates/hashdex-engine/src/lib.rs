//! Simulation engine for Hashdex.
//!
//! The engine owns a page store and, once constructed, a bucket index, and
//! exposes the load/construct/search/scan operations whose costs the
//! statistics make comparable.

mod engine;

pub use engine::{Engine, EngineState, SearchResult};
