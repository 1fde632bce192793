//! HTTP client for the counting endpoint.

use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Deserializer, de};
use serde_json::Number;

use super::error::{Error, FetchError, Result};
use super::state::Count;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Body returned by the counting endpoint. Fields other than `count` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CounterResponse {
    /// Current visitor count. `None` when the field is absent or `null`.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub count: Option<u64>,
}

/// Accept non-negative integers, including floats with no fractional part (`42.0`).
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(|n| {
            whole_number(&n).ok_or_else(|| {
                de::Error::custom(format!("count must be a non-negative integer, got {n}"))
            })
        })
        .transpose()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(n: &Number) -> Option<u64> {
    // 2^64, the first float past u64::MAX
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;

    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < LIMIT)
            .map(|f| f as u64)
    })
}

impl From<CounterResponse> for Count {
    fn from(response: CounterResponse) -> Self {
        Self(response.count)
    }
}

/// Client bound to a single counting endpoint.
#[derive(Debug, Clone)]
pub struct CounterClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl CounterClient {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns error if `endpoint` is not an absolute http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint).map_err(|e| Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }

        let http = reqwest::Client::builder().build()?;

        tracing::debug!(endpoint = %url, "counter client created");

        Ok(Self {
            http,
            endpoint: url,
        })
    }

    /// The endpoint this client queries.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the current count.
    ///
    /// The content type is checked before the status, so a non-JSON error
    /// page is reported as [`FetchError::UnexpectedContentType`].
    pub async fn fetch(&self) -> std::result::Result<Count, FetchError> {
        tracing::info!(endpoint = %self.endpoint, "requesting counter");

        let response = self
            .http
            .get(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "counter response received");

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains(JSON_MEDIA_TYPE));

        if !is_json {
            let body = response.text().await?;
            return Err(FetchError::unexpected_content_type(&body));
        }

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let count = parse_count(&body)?;
        tracing::debug!(count = %count, "counter response decoded");

        Ok(count)
    }
}

/// Decode a response body into a [`Count`].
///
/// The body must be a JSON object. A missing or `null` `count` is accepted;
/// any other non-integer or negative value is malformed.
pub fn parse_count(body: &str) -> std::result::Result<Count, FetchError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    if !value.is_object() {
        return Err(FetchError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    }

    let response: CounterResponse =
        serde_json::from_value(value).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    Ok(response.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FailureKind;

    #[test]
    fn parses_count() {
        assert_eq!(parse_count(r#"{"count": 42}"#), Ok(Count(Some(42))));
    }

    #[test]
    fn ignores_extra_fields() {
        let body = r#"{"count": 7, "message": "Visitor count updated successfully"}"#;
        assert_eq!(parse_count(body), Ok(Count(Some(7))));
    }

    #[test]
    fn missing_count_is_accepted() {
        assert_eq!(parse_count("{}"), Ok(Count(None)));
        assert_eq!(parse_count(r#"{"count": null}"#), Ok(Count(None)));
    }

    #[test]
    fn integral_float_count_is_accepted() {
        assert_eq!(parse_count(r#"{"count": 42.0}"#), Ok(Count(Some(42))));
        assert_eq!(parse_count(r#"{"count": 1e3}"#), Ok(Count(Some(1000))));
    }

    #[test]
    fn negative_count_is_malformed() {
        for body in [r#"{"count": -1}"#, r#"{"count": -2.0}"#] {
            let err = parse_count(body).unwrap_err();
            assert_eq!(err.kind(), FailureKind::MalformedResponse, "body: {body}");
        }
    }

    #[test]
    fn non_integer_count_is_malformed() {
        for body in [r#"{"count": "12"}"#, r#"{"count": 1.5}"#, r#"{"count": [1]}"#] {
            let err = parse_count(body).unwrap_err();
            assert_eq!(err.kind(), FailureKind::MalformedResponse, "body: {body}");
        }
    }

    #[test]
    fn non_object_body_is_malformed() {
        for body in ["[42]", "42", "not json", ""] {
            let err = parse_count(body).unwrap_err();
            assert_eq!(err.kind(), FailureKind::MalformedResponse, "body: {body}");
        }
    }

    #[test]
    fn rejects_invalid_endpoint() {
        assert!(matches!(
            CounterClient::new("not a url"),
            Err(Error::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            CounterClient::new("ftp://example.com/count"),
            Err(Error::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn keeps_endpoint() {
        let client = CounterClient::new("http://127.0.0.1:9/count").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:9/count");
    }
}
