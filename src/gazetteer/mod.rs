//! Upstream gazetteer search.

mod client;

use async_trait::async_trait;

use crate::error::UpstreamFailure;
use crate::models::RawEntry;

pub use client::{local_type_filter, OsNamesClient};

/// A source of raw gazetteer entries for a free-text query.
#[async_trait]
pub trait GazetteerSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<RawEntry>, UpstreamFailure>;
}
