//! Placefinder - resolves typed UK place names and partial postcodes into
//! selectable gazetteer entries.
//!
//! This library provides the resolution pipeline and HTTP surface shared by
//! the server and lookup binaries.

pub mod api;
pub mod config;
pub mod error;
pub mod gazetteer;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod resolver;

pub use models::{LocationType, QueryInput, RawEntry, ResolvedEntry};
pub use resolver::{Resolution, Resolver};
