//! Service client
//!
//! A [`ServiceClient`] is bound to one service endpoint (already carrying
//! the API version, e.g. `https://ces.eu-west-0.stratuscloud.example/V1.0`)
//! and one project, and combines authentication with the HTTP layer.
//! Resource operations build their URLs through [`ServiceClient::service_url`]
//! and issue exactly one request each.

use crate::auth::Credentials;
use crate::error::Result;
use crate::http::{HttpClient, RequestOpts};
use serde_json::Value;
use url::Url;

/// Client for one Stratus service endpoint
#[derive(Clone)]
pub struct ServiceClient {
    pub http: HttpClient,
    pub credentials: Credentials,
    endpoint: Url,
    pub project_id: String,
}

impl ServiceClient {
    /// Create a client for `endpoint`, scoped to `project_id`.
    pub fn new(endpoint: &str, project_id: &str, credentials: Credentials) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let http = HttpClient::new()?;

        Ok(Self {
            http,
            credentials,
            endpoint,
            project_id: project_id.to_string(),
        })
    }

    /// Get the current access token
    pub async fn token(&self) -> Result<String> {
        self.credentials.token().await
    }

    /// Build a resource URL under this client's endpoint and project.
    ///
    /// Each segment is percent-encoded, so resource ids can be passed
    /// through as-is: `client.service_url(&["alarms", id, "action"])` yields
    /// `{endpoint}/{project_id}/alarms/{id}/action`.
    pub fn service_url(&self, segments: &[&str]) -> String {
        let mut url = self.endpoint.as_str().trim_end_matches('/').to_string();

        url.push('/');
        url.push_str(&urlencoding::encode(&self.project_id));

        for segment in segments {
            if segment.is_empty() {
                continue;
            }
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }

        url
    }

    /// Make a GET request against this service
    pub async fn get(&self, url: &str, opts: &RequestOpts) -> Result<Value> {
        let token = self.token().await?;
        self.http.get(url, &token, opts).await
    }

    /// Make a POST request against this service
    pub async fn post(&self, url: &str, body: Option<&Value>, opts: &RequestOpts) -> Result<Value> {
        let token = self.token().await?;
        self.http.post(url, &token, body, opts).await
    }

    /// Make a PUT request against this service
    pub async fn put(&self, url: &str, body: Option<&Value>, opts: &RequestOpts) -> Result<Value> {
        let token = self.token().await?;
        self.http.put(url, &token, body, opts).await
    }

    /// Make a DELETE request against this service
    pub async fn delete(&self, url: &str, opts: &RequestOpts) -> Result<Value> {
        let token = self.token().await?;
        self.http.delete(url, &token, opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> ServiceClient {
        ServiceClient::new(endpoint, "0a1b2c3d4e5f0a1b2c3d4e5f0a1b2c3d", Credentials::from_static("t"))
            .unwrap()
    }

    #[test]
    fn service_url_joins_project_and_segments() {
        let client = client("https://ces.eu-west-0.stratuscloud.example/V1.0");
        assert_eq!(
            client.service_url(&["alarms", "al-123", "action"]),
            "https://ces.eu-west-0.stratuscloud.example/V1.0/0a1b2c3d4e5f0a1b2c3d4e5f0a1b2c3d/alarms/al-123/action"
        );
    }

    #[test]
    fn trailing_slash_on_endpoint_does_not_double_up() {
        let client = client("https://ces.eu-west-0.stratuscloud.example/V1.0/");
        let url = client.service_url(&["alarms"]);
        assert!(!url.contains("//0a1b"));
        assert!(url.ends_with("/alarms"));
    }

    #[test]
    fn segments_are_percent_encoded() {
        let client = client("https://ces.eu-west-0.stratuscloud.example/V1.0");
        let url = client.service_url(&["alarms", "id with spaces/and?query"]);
        assert!(url.ends_with("/alarms/id%20with%20spaces%2Fand%3Fquery"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let result = ServiceClient::new("not a url", "p", Credentials::from_static("t"));
        assert!(result.is_err());
    }
}
