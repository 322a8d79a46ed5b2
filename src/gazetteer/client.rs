//! OS Names API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::GazetteerSearch;
use crate::config::GazetteerConfig;
use crate::error::{ConfigError, UpstreamFailure};
use crate::models::RawEntry;

const USER_AGENT: &str = "placefinder/0.1 (uk place lookup)";

/// Gazetteer types a search is restricted to. Order matters to the upstream.
const LOCAL_TYPES: &[&str] = &[
    "City",
    "Town",
    "Village",
    "Suburban_Area",
    "Postcode",
    "Airport",
];

/// `LOCAL_TYPE:City+LOCAL_TYPE:Town+...`
pub fn local_type_filter() -> String {
    LOCAL_TYPES
        .iter()
        .map(|t| format!("LOCAL_TYPE:{}", t))
        .collect::<Vec<_>>()
        .join("+")
}

/// Searches the OS Names gazetteer over HTTPS.
#[derive(Clone)]
pub struct OsNamesClient {
    client: Client,
    api_url: Url,
    api_key: Option<String>,
}

impl OsNamesClient {
    pub fn new(config: &GazetteerConfig) -> Result<Self, ConfigError> {
        let api_url = Url::parse(&config.api_url).map_err(|source| ConfigError::InvalidUrl {
            url: config.api_url.clone(),
            source,
        })?;

        let mut builder = Client::builder().user_agent(USER_AGENT);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(ref proxy_url) = config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|source| ConfigError::InvalidProxy {
                url: proxy_url.clone(),
                source,
            })?;
            builder = builder.proxy(proxy);
            info!("Routing gazetteer requests through proxy {}", proxy_url);
        } else {
            // only an explicitly configured proxy is used
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build().map_err(ConfigError::Client)?,
            api_url,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// Full search URL for `query`, including the API key.
    pub fn search_url(&self, query: &str) -> Url {
        self.build_url(query, self.api_key.as_deref())
    }

    fn build_url(&self, query: &str, key: Option<&str>) -> Url {
        let mut url = self.api_url.clone();
        // form encoding: spaces go out as '+', which the API reads as '%20'
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("filter", &local_type_filter());
            if let Some(key) = key {
                pairs.append_pair("key", key);
            }
        }
        url
    }
}

#[async_trait]
impl GazetteerSearch for OsNamesClient {
    async fn search(&self, query: &str) -> Result<Vec<RawEntry>, UpstreamFailure> {
        // never log the key
        info!("Gazetteer search requested: {}", self.build_url(query, None));

        // reqwest errors carry the request url, key included
        let response = self
            .client
            .get(self.search_url(query))
            .send()
            .await
            .map_err(|e| UpstreamFailure::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            return Err(UpstreamFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamFailure::Transport(e.without_url()))?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamFailure::Decode(e.to_string()))?;

        Ok(parse_results(body))
    }
}

/// Pull the `results` array out of a search response body.
///
/// A body without results is an empty result set. Individual results that
/// are not gazetteer entries are skipped.
fn parse_results(mut body: Value) -> Vec<RawEntry> {
    let results = match body.get_mut("results").map(Value::take) {
        Some(Value::Array(results)) => results,
        _ => {
            debug!("Gazetteer response carried no results");
            return Vec::new();
        }
    };

    let total = results.len();
    let entries: Vec<RawEntry> = results
        .into_iter()
        .filter_map(|result| match serde_json::from_value(result) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping malformed gazetteer result: {}", e);
                None
            }
        })
        .collect();

    debug!("Decoded {}/{} gazetteer results", entries.len(), total);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(api_key: Option<&str>) -> GazetteerConfig {
        GazetteerConfig {
            api_url: "https://api.example.com/search/names/v1/find".into(),
            api_key: api_key.map(String::from),
            ..GazetteerConfig::default()
        }
    }

    #[test]
    fn test_filter_order() {
        assert_eq!(
            local_type_filter(),
            "LOCAL_TYPE:City+LOCAL_TYPE:Town+LOCAL_TYPE:Village+LOCAL_TYPE:Suburban_Area+LOCAL_TYPE:Postcode+LOCAL_TYPE:Airport"
        );
    }

    #[test]
    fn test_search_url_escapes_query() {
        let client = OsNamesClient::new(&config(Some("secret"))).unwrap();
        let url = client.search_url("Lon&don");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "Lon&don".to_string()),
                ("filter".to_string(), local_type_filter()),
                ("key".to_string(), "secret".to_string()),
            ]
        );
        assert!(url.as_str().contains("q=Lon%26don"));
        assert!(url.as_str().contains("LOCAL_TYPE%3ACity%2BLOCAL_TYPE%3ATown"));
    }

    #[test]
    fn test_empty_key_is_omitted() {
        let client = OsNamesClient::new(&config(Some(""))).unwrap();
        assert!(client.search_url("Leeds").query_pairs().all(|(k, _)| k != "key"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = GazetteerConfig {
            api_url: "not a url".into(),
            ..GazetteerConfig::default()
        };
        assert!(matches!(
            OsNamesClient::new(&config),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_parse_results_missing() {
        assert!(parse_results(json!({ "header": {} })).is_empty());
        assert!(parse_results(json!({ "results": null })).is_empty());
    }

    #[test]
    fn test_parse_results_skips_malformed() {
        let entries = parse_results(json!({
            "results": [
                { "GAZETTEER_ENTRY": { "NAME1": "Leeds" } },
                { "SOMETHING_ELSE": {} },
                { "GAZETTEER_ENTRY": { "NAME2": "no primary name" } }
            ]
        }));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].gazetteer_entry.name1, "Leeds");
    }
}
