//! Core data models for place resolution.

pub mod entry;
pub mod query;

pub use entry::{GazetteerEntry, RawEntry, ResolvedEntry, ResolvedGazetteerEntry};
pub use query::{LocationType, NormalizedQuery, QueryInput};
