//! Bearer token attachment for outgoing requests.

use contable_platform_access::SessionStore;
use reqwest::header::{AUTHORIZATION, HeaderValue};

/// Something that can hand out the current bearer token.
pub trait TokenSource {
    /// Returns the token to attach, if any.
    fn bearer_token(&self) -> Option<String>;
}

impl TokenSource for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}

/// Adds `Authorization: Bearer <token>` to requests when a token is available.
///
/// Requests are taken by value and handed back, so a caller never sees one
/// that is half-modified. Nothing here blocks, retries or looks at responses.
#[derive(Debug, Clone)]
pub struct BearerAuth<T> {
    source: T,
}

impl<T: TokenSource> BearerAuth<T> {
    /// Creates an augmenter reading tokens from `source`.
    pub fn new(source: T) -> Self {
        Self { source }
    }

    /// Returns the token source.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Attaches the current token to `request`, or forwards it untouched.
    #[must_use]
    pub fn apply(&self, mut request: reqwest::Request) -> reqwest::Request {
        let Some(token) = self.source.bearer_token().filter(|t| !t.is_empty()) else {
            return request;
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!(
                    url = %request.url(),
                    "stored token is not a valid header value; sending request without it"
                );
            }
        }
        request
    }
}
