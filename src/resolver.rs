//! Place resolution: normalize, search, dedupe, match.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::UpstreamFailure;
use crate::gazetteer::GazetteerSearch;
use crate::matching::{dedupe, MatchFilter};
use crate::models::{LocationType, QueryInput, ResolvedEntry};
use crate::normalize::normalize;

/// Outcome of resolving one query.
#[derive(Debug)]
pub enum Resolution {
    /// Nothing was typed; no search was made
    Blank,
    /// The location type is outside the UK gazetteer
    Unsupported(LocationType),
    /// The gazetteer could not be reached or answered with an error
    Unavailable(UpstreamFailure),
    /// Matching entries, possibly none
    Resolved(Vec<ResolvedEntry>),
}

impl Resolution {
    pub fn entries(&self) -> Option<&[ResolvedEntry]> {
        match self {
            Resolution::Resolved(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }
}

/// Resolves free-text locations against a gazetteer.
#[derive(Clone)]
pub struct Resolver {
    gazetteer: Arc<dyn GazetteerSearch>,
    filter: MatchFilter,
}

impl Resolver {
    pub fn new(gazetteer: Arc<dyn GazetteerSearch>, filter: MatchFilter) -> Self {
        Self { gazetteer, filter }
    }

    pub async fn resolve_place(
        &self,
        input: &QueryInput,
        location_type: &LocationType,
    ) -> Resolution {
        let query = normalize(input);

        if query.is_blank {
            info!("Invalid input: userLocation is blank : {:?}", query.raw);
            return Resolution::Blank;
        }
        info!("Valid input: userLocation provided : {}", query.trimmed);

        if !location_type.is_supported() {
            info!("Location type '{}' is not served", location_type);
            return Resolution::Unsupported(location_type.clone());
        }

        let raw = match self.gazetteer.search(&query.trimmed).await {
            Ok(raw) => raw,
            Err(failure) => {
                error!(
                    "Error fetching gazetteer data (status {:?}): {}",
                    failure.status(),
                    failure
                );
                return Resolution::Unavailable(failure);
            }
        };

        let received = raw.len();
        let unique = dedupe(raw);
        debug!("{} gazetteer entries, {} after dedupe", received, unique.len());

        Resolution::Resolved(self.filter.filter(&unique, &query.trimmed, &query.upper))
    }
}
