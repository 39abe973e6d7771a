use crate::api::models::HttpValidationError;
use crate::error::ApiError;
use crate::utils::error_helpers::{convert_json_error, convert_request_error};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const USER_AGENT: &str = concat!("brickdash/", env!("CARGO_PKG_VERSION"));

/// Flat, ordered query parameters. Absent values are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` when `value` is present
    pub fn with<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    pub base_url: String,
    timeout: Option<Duration>,
}

impl ApiClient {
    /// Create a client for `base_url`. No request timeout unless one is given.
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;

        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Absolute URL for `segments` under the base origin.
    ///
    /// Each segment is percent-encoded as a whole, `/` included, so callers
    /// pass raw identifiers (`["lego-sets", "10179/1"]`). `.` and `..` cannot
    /// be carried by a URL path and are rejected.
    pub fn build_url(&self, segments: &[&str], params: &QueryParams) -> Result<Url, ApiError> {
        let invalid = |message: String| ApiError::InvalidUrl {
            url: format!("{}{}", self.base_url, endpoint(segments)),
            message,
        };

        if let Some(dots) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(invalid(format!("'{}' is not a valid path segment", dots)));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;

        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| invalid("base URL cannot carry a path".to_string()))?
                .pop_if_empty()
                .extend(segments);
        }

        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.iter() {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// GET the resource at `segments` and decode the JSON body as `T`
    pub async fn get_json<T>(&self, segments: &[&str], params: &QueryParams) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(segments, params)?;
        let path = endpoint(segments);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| convert_request_error(e, &path, self.timeout))?;

        self.handle_response(response, &path).await
    }

    pub async fn handle_response<T>(&self, response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            let body = response
                .bytes()
                .await
                .map_err(|e| convert_request_error(e, endpoint, self.timeout))?;
            serde_json::from_slice::<T>(&body).map_err(|e| convert_json_error(e, endpoint))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if status == StatusCode::UNPROCESSABLE_ENTITY {
                log_validation_detail(endpoint, &error_text);
            }

            Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: error_text,
            })
        }
    }
}

/// `/lego-sets/7140-1`, used to label errors and log lines
fn endpoint(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

fn log_validation_detail(endpoint: &str, body: &str) {
    let Ok(parsed) = serde_json::from_str::<HttpValidationError>(body) else {
        return;
    };
    for detail in parsed.detail.unwrap_or_default() {
        debug!(endpoint, kind = %detail.kind, "validation error: {}", detail.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(DEFAULT_BASE_URL.to_string(), None).expect("client creation failed")
    }

    #[test]
    fn test_client_creation_trims_trailing_slash() {
        let client = ApiClient::new("http://example.test/".to_string(), None)
            .expect("client creation failed");
        assert_eq!(client.base_url, "http://example.test");
        assert!(client.timeout().is_none());
    }

    #[test]
    fn test_query_params_skip_absent_values() {
        let params = QueryParams::new()
            .with("skip", Some(0))
            .with("limit", None::<u32>)
            .with("is_lego", Some(false));
        assert_eq!(params.len(), 2);
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("skip", "0"), ("is_lego", "false")]);
    }

    #[test]
    fn test_build_url_without_params() {
        let url = client()
            .build_url(&["stats"], &QueryParams::new())
            .expect("Failed to build url");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/stats");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_with_params() {
        let params = QueryParams::new()
            .with("skip", Some(0))
            .with("limit", Some(5))
            .with("is_lego", None::<bool>);
        let url = client()
            .build_url(&["inventory"], &params)
            .expect("Failed to build url");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/inventory?skip=0&limit=5");
    }

    #[test]
    fn test_build_url_root() {
        let url = client()
            .build_url(&[], &QueryParams::new())
            .expect("Failed to build url");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let client = ApiClient::new("http://example.test/api/v1".to_string(), None)
            .expect("client creation failed");
        let url = client
            .build_url(&["lego-sets", "7140-1"], &QueryParams::new())
            .expect("Failed to build url");
        assert_eq!(url.as_str(), "http://example.test/api/v1/lego-sets/7140-1");
    }

    #[test]
    fn test_build_url_encodes_segments_and_values() {
        let params = QueryParams::new().with("q", Some("a b&c"));
        let url = client()
            .build_url(&["lego-sets", "odd set#1"], &params)
            .expect("Failed to build url");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/lego-sets/odd%20set%231?q=a+b%26c"
        );
    }

    #[test]
    fn test_build_url_rejects_invalid_base() {
        let client =
            ApiClient::new("not a url".to_string(), None).expect("client creation failed");
        let result = client.build_url(&["stats"], &QueryParams::new());
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }

    #[test]
    fn test_build_url_keeps_identifier_in_one_segment() {
        let url = client()
            .build_url(&["lego-sets", "10179/1"], &QueryParams::new())
            .expect("Failed to build url");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/lego-sets/10179%2F1");
    }

    #[test]
    fn test_build_url_rejects_dot_segments() {
        for dots in [".", ".."] {
            let result = client().build_url(&["lego-sets", dots], &QueryParams::new());
            match result {
                Err(ApiError::InvalidUrl { url, .. }) => {
                    assert_eq!(url, format!("http://127.0.0.1:8000/lego-sets/{}", dots));
                }
                other => panic!("expected InvalidUrl, got {:?}", other),
            }
        }
    }
}
