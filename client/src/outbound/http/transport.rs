//! Shared reqwest transport for every resource adapter.
//!
//! The transport owns request construction (base URL, JSON content type,
//! bearer header), non-success mapping (error body extraction plus
//! translation), and JSON decoding. Resource adapters only pick the method,
//! path, body, and fallback phrase.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::ErrorBody;
use crate::config::{ApiBaseUrl, TranslationScope};
use crate::domain::{ApiError, ApiResult, ErrorTranslator, SessionStore};

/// Phrase surfaced when an error response body cannot be parsed.
pub(crate) const UNKNOWN_ERROR: &str = "Unknown error";

/// Backend resource families, used to scope error translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFamily {
    /// `/api/v1/auth/*`.
    Auth,
    /// `/api/v1/compliments*`.
    Compliments,
    /// `/tasks*`.
    Tasks,
    /// `/users*`.
    Users,
}

/// Whether an endpoint carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Authentication {
    /// Never attach a token.
    Anonymous,
    /// Attach the token when one is stored.
    Bearer,
}

/// HTTP plumbing shared by every resource adapter.
pub struct ApiTransport {
    client: Client,
    base_url: ApiBaseUrl,
    sessions: Arc<SessionStore>,
    translator: Arc<ErrorTranslator>,
    scope: TranslationScope,
}

impl ApiTransport {
    /// Build a transport with a default reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: ApiBaseUrl,
        sessions: Arc<SessionStore>,
        translator: Arc<ErrorTranslator>,
        scope: TranslationScope,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(
            client, base_url, sessions, translator, scope,
        ))
    }

    /// Build a transport around an existing reqwest client.
    pub fn with_client(
        client: Client,
        base_url: ApiBaseUrl,
        sessions: Arc<SessionStore>,
        translator: Arc<ErrorTranslator>,
        scope: TranslationScope,
    ) -> Self {
        Self {
            client,
            base_url,
            sessions,
            translator,
            scope,
        }
    }

    /// Session store the transport reads tokens from.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        auth: Authentication,
    ) -> ApiResult<RequestBuilder> {
        let url = self.base_url.endpoint(path);
        debug!(%method, %url, "dispatching request");
        let mut builder = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        if auth == Authentication::Bearer {
            if let Some(token) = self.sessions.token()? {
                builder = builder.bearer_auth(token.expose());
            }
        }
        Ok(builder)
    }

    /// Send and require a success status; the body is returned unread.
    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
        family: ResourceFamily,
        fallback: &str,
    ) -> ApiResult<Response> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let raw = extract_error_message(body.as_ref(), fallback);
        let message = if self.scope.covers(family) {
            self.translator.translate(&raw)
        } else {
            raw.clone()
        };
        warn!(status = status.as_u16(), ?family, error = %raw, "request rejected");
        Err(ApiError::rejected(status.as_u16(), message))
    }

    /// Send and decode a JSON success body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        family: ResourceFamily,
        fallback: &str,
    ) -> ApiResult<T> {
        let response = self.send(builder, family, fallback).await?;
        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(body.as_ref()).map_err(|error| ApiError::decode(error.to_string()))
    }

    /// Send and decode a JSON body that may be empty, `null`, or `204`.
    pub(crate) async fn send_optional<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        family: ResourceFamily,
        fallback: &str,
    ) -> ApiResult<Option<T>> {
        let response = self.send(builder, family, fallback).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice::<Option<T>>(body.as_ref())
            .map_err(|error| ApiError::decode(error.to_string()))
    }

    /// Send and discard any success body.
    pub(crate) async fn send_empty(
        &self,
        builder: RequestBuilder,
        family: ResourceFamily,
        fallback: &str,
    ) -> ApiResult<()> {
        self.send(builder, family, fallback).await.map(|_| ())
    }
}

/// Message carried by an error body.
///
/// A body that is not JSON yields [`UNKNOWN_ERROR`]. Any other JSON without
/// a usable `error` field (a non-object, a blank string, `null`) yields the
/// operation's `fallback`. Numeric errors are rendered as text.
pub(crate) fn extract_error_message(body: &[u8], fallback: &str) -> String {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return UNKNOWN_ERROR.to_owned();
    };
    serde_json::from_value::<ErrorBody>(value)
        .ok()
        .and_then(ErrorBody::message)
        .unwrap_or_else(|| fallback.to_owned())
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::transport(error.to_string())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error body extraction.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(br#"{"error":"invalid credentials"}"#.as_slice(), "invalid credentials")]
    #[case(br#"{"error":""}"#.as_slice(), "Login failed")]
    #[case(br#"{"message":"nope"}"#.as_slice(), "Login failed")]
    #[case(br#"{"error":null}"#.as_slice(), "Login failed")]
    #[case(b"<html>bad gateway</html>".as_slice(), UNKNOWN_ERROR)]
    #[case(b"".as_slice(), UNKNOWN_ERROR)]
    #[case(br#""oops""#.as_slice(), "Login failed")]
    #[case(b"[]".as_slice(), "Login failed")]
    #[case(b"null".as_slice(), "Login failed")]
    #[case(br#"{"error":42}"#.as_slice(), "42")]
    #[case(br#"{"error":0}"#.as_slice(), "Login failed")]
    #[case(br#"{"error":{"code":1}}"#.as_slice(), "Login failed")]
    fn extracts_error_messages(#[case] body: &[u8], #[case] expected: &str) {
        assert_eq!(extract_error_message(body, "Login failed"), expected);
    }
}
