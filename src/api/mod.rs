//! HTTP surface for place lookups.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{self, HeaderName},
        HeaderValue, Method,
    },
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::ConfigError;
use crate::models::{LocationType, QueryInput, ResolvedEntry};
use crate::resolver::{Resolution, Resolver};

/// Value of `places` when no location was given.
pub const NO_DATA_FOUND: &str = "no data found";

const SECURITY_HEADERS: &[(&str, &str)] = &[
    (
        "content-security-policy",
        "default-src 'self'; script-src 'self'; object-src 'none'; frame-ancestors 'none'; base-uri 'self'",
    ),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    (
        "strict-transport-security",
        "max-age=63072000; includeSubDomains; preload",
    ),
];

/// Application state shared across handlers
pub struct AppState {
    pub resolver: Resolver,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlacesRequest {
    /// A string, or an object with its own `userLocation` string
    #[serde(rename = "userLocation", default)]
    pub user_location: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub message: &'static str,
    /// Absent when the lookup could not be made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places: Option<Places>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Places {
    Entries(Vec<ResolvedEntry>),
    NotFound(&'static str),
}

impl From<Resolution> for PlacesResponse {
    fn from(resolution: Resolution) -> Self {
        let places = match resolution {
            Resolution::Resolved(entries) => Some(Places::Entries(entries)),
            Resolution::Blank => Some(Places::NotFound(NO_DATA_FOUND)),
            Resolution::Unsupported(_) | Resolution::Unavailable(_) => None,
        };

        Self {
            message: "success",
            places,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
}

/// Build the router with CORS and security headers applied.
pub fn build_router(state: Arc<AppState>, allow_origin_url: &str) -> Result<Router, ConfigError> {
    let allow_origin = if allow_origin_url == "*" {
        AllowOrigin::any()
    } else {
        let origin = HeaderValue::from_str(allow_origin_url).map_err(|source| {
            ConfigError::InvalidOrigin {
                origin: allow_origin_url.to_string(),
                source,
            }
        })?;
        AllowOrigin::exact(origin)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/places", post(places_handler));

    for &(name, value) in SECURITY_HEADERS {
        app = app.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    Ok(app
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
    })
}

/// Resolve a typed location into selectable places
async fn places_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlacesRequest>, JsonRejection>,
) -> Json<PlacesResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            warn!("Unreadable places request, treating as blank: {}", e);
            PlacesRequest::default()
        }
    };

    let input = QueryInput::from_value(request.user_location.as_ref());
    let resolution = state
        .resolver
        .resolve_place(&input, &LocationType::UkLocation)
        .await;

    Json(PlacesResponse::from(resolution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamFailure;
    use crate::models::GazetteerEntry;
    use serde_json::json;

    #[test]
    fn test_blank_envelope() {
        let value = serde_json::to_value(PlacesResponse::from(Resolution::Blank)).unwrap();
        assert_eq!(value, json!({ "message": "success", "places": "no data found" }));
    }

    #[test]
    fn test_unavailable_envelope_omits_places() {
        let failure = UpstreamFailure::Decode("bad".into());
        let value =
            serde_json::to_value(PlacesResponse::from(Resolution::Unavailable(failure))).unwrap();
        assert_eq!(value, json!({ "message": "success" }));

        let unsupported = Resolution::Unsupported(LocationType::parse("non-uk-location"));
        let value = serde_json::to_value(PlacesResponse::from(unsupported)).unwrap();
        assert_eq!(value, json!({ "message": "success" }));
    }

    #[test]
    fn test_resolved_envelope() {
        let mut entry = GazetteerEntry::new("Oxford");
        entry.county_unitary = Some("Oxfordshire".into());
        let resolved = ResolvedEntry::new(entry, "oxford-oxfordshire".into());

        let value =
            serde_json::to_value(PlacesResponse::from(Resolution::Resolved(vec![resolved])))
                .unwrap();
        assert_eq!(
            value,
            json!({
                "message": "success",
                "places": [{
                    "GAZETTEER_ENTRY": {
                        "ID": "oxford-oxfordshire",
                        "NAME1": "Oxford",
                        "COUNTY_UNITARY": "Oxfordshire"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_empty_resolved_is_empty_list() {
        let value = serde_json::to_value(PlacesResponse::from(Resolution::Resolved(Vec::new())))
            .unwrap();
        assert_eq!(value["places"], json!([]));
    }
}
