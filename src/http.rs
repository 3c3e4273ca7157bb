//! HTTP utilities for Stratus REST API calls

use crate::error::{Result, SdkError};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

/// Maximum length of response body carried in errors and logs
/// (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize a response body for logging and error messages.
/// Strips non-printable characters and truncates long responses.
fn sanitize_body(body: &str) -> String {
    let cleaned: String = body
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(MAX_LOG_BODY_LENGTH)
        .collect();

    if cleaned.len() < body.len() {
        format!("{}... [truncated, {} bytes total]", cleaned, body.len())
    } else {
        cleaned
    }
}

/// Expected-status options for a single request.
///
/// `ok_codes: None` accepts any 2xx status. Operations whose API contract
/// names an exact status (e.g. 204 for alarm-action updates) pass an
/// explicit list; any other status, success-range or not, is an error.
#[derive(Debug, Clone, Default)]
pub struct RequestOpts {
    pub ok_codes: Option<Vec<u16>>,
}

impl RequestOpts {
    /// Accept exactly one status code.
    pub fn expect_status(code: u16) -> Self {
        Self {
            ok_codes: Some(vec![code]),
        }
    }

    fn accepts(&self, status: StatusCode) -> bool {
        match &self.ok_codes {
            Some(codes) => codes.contains(&status.as_u16()),
            None => status.is_success(),
        }
    }
}

/// HTTP client wrapper for Stratus API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("stratus-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, token: &str, opts: &RequestOpts) -> Result<Value> {
        self.send(Method::GET, url, token, None, opts).await
    }

    /// Make a POST request with an optional JSON body
    pub async fn post(
        &self,
        url: &str,
        token: &str,
        body: Option<&Value>,
        opts: &RequestOpts,
    ) -> Result<Value> {
        self.send(Method::POST, url, token, body, opts).await
    }

    /// Make a PUT request with an optional JSON body
    pub async fn put(
        &self,
        url: &str,
        token: &str,
        body: Option<&Value>,
        opts: &RequestOpts,
    ) -> Result<Value> {
        self.send(Method::PUT, url, token, body, opts).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, token: &str, opts: &RequestOpts) -> Result<Value> {
        self.send(Method::DELETE, url, token, None, opts).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&Value>,
        opts: &RequestOpts,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let response_body = response.text().await?;

        if !opts.accepts(status) {
            // Only log the sanitized/truncated body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_body(&response_body));
            return Err(SdkError::UnexpectedStatus {
                status: status.as_u16(),
                body: sanitize_body(&response_body),
            });
        }

        // 204-style responses carry no body
        if response_body.is_empty() {
            return Ok(Value::Null);
        }

        crate::extract::from_str(&response_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts_accept_any_success_status() {
        let opts = RequestOpts::default();
        assert!(opts.accepts(StatusCode::OK));
        assert!(opts.accepts(StatusCode::NO_CONTENT));
        assert!(!opts.accepts(StatusCode::BAD_REQUEST));
        assert!(!opts.accepts(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn explicit_ok_codes_reject_other_success_statuses() {
        let opts = RequestOpts::expect_status(204);
        assert!(opts.accepts(StatusCode::NO_CONTENT));
        assert!(!opts.accepts(StatusCode::OK));
        assert!(!opts.accepts(StatusCode::ACCEPTED));
    }

    #[test]
    fn sanitize_truncates_and_strips_control_chars() {
        let long = "x".repeat(300);
        let sanitized = sanitize_body(&long);
        assert!(sanitized.contains("truncated, 300 bytes total"));

        let sanitized = sanitize_body("ok\u{1b}[31mred\u{1b}[0m");
        assert!(!sanitized.contains('\u{1b}'));
    }
}
