//! HTTP client for the accounting backend.

use crate::bearer::{BearerAuth, TokenSource};
use crate::error::{ApiError, ErrorBody};
use rootcause::prelude::Report;
use serde::de::DeserializeOwned;

/// Client for the backend REST API.
///
/// Every request is built, passed through [`BearerAuth`], then executed.
/// Non-success statuses become [`ApiError::Status`] with the body parsed
/// best-effort.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    http: reqwest::Client,
    base_url: String,
    auth: BearerAuth<T>,
}

impl<T: TokenSource> ApiClient<T> {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, source: T) -> Result<Self, Report<ApiError>> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Client {
                details: e.to_string(),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(base_url = %base_url, "API client created");

        Ok(Self {
            http,
            base_url,
            auth: BearerAuth::new(source),
        })
    }

    /// Returns the base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the token source requests are authenticated with.
    pub fn token_source(&self) -> &T {
        self.auth.source()
    }

    /// Joins `path` onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.endpoint(path))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.endpoint(path))
    }

    /// Builds, authenticates and executes a request.
    pub(crate) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let request = self.auth.apply(builder.build()?);
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%method, %url, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        tracing::warn!(%method, %url, status = status.as_u16(), "backend returned an error");
        Err(ApiError::Status {
            status: status.as_u16(),
            body: ErrorBody::parse(&raw),
        })
    }

    /// Executes a request and decodes the JSON answer.
    pub(crate) async fn send_json<R: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<R, ApiError> {
        let response = self.send(builder).await?;
        response.json::<R>().await.map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoToken;

    impl TokenSource for NoToken {
        fn bearer_token(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn endpoints_join_without_duplicate_slashes() {
        let client = ApiClient::new("http://localhost:8080/api/", NoToken).expect("client");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.endpoint("/auth/login"),
            "http://localhost:8080/api/auth/login"
        );
        assert_eq!(
            client.endpoint("dashboard/metrics"),
            "http://localhost:8080/api/dashboard/metrics"
        );
    }
}
