use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use gaestebuch_common::model::identity::Identity;
use std::convert::Infallible;

pub const IDENTITY_HEADER: &str = "x-forwarded-user";
pub const NAME_HEADER: &str = "x-forwarded-preferred-username";
pub const EMAIL_HEADER: &str = "x-forwarded-email";

/// Display name shown for signed-out callers.
pub const ANONYMOUS_VIEWER: &str = "Anonymous Poster";

/// The caller's identity as reported by the authenticating proxy in front
/// of the application.
///
/// The proxy asserts identity through the `x-forwarded-*` headers. A
/// request without them is simply signed out, never an error. The display
/// name falls back to the email when the proxy sends no preferred
/// username.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct CurrentIdentity(pub Option<Identity>);

impl CurrentIdentity {
    #[must_use]
    pub fn viewer_name(&self) -> &str {
        self.0
            .as_ref()
            .map_or(ANONYMOUS_VIEWER, |identity| &identity.name)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(identity_from_headers(&parts.headers)))
    }
}

fn identity_from_headers(headers: &HeaderMap) -> Option<Identity> {
    let id = non_empty(headers, IDENTITY_HEADER)?;
    let email = non_empty(headers, EMAIL_HEADER)?;
    let name = non_empty(headers, NAME_HEADER).unwrap_or_else(|| email.clone());

    Some(Identity { id, name, email })
}

fn non_empty(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Login and logout URL builders for the external identity provider.
///
/// Both attach the page to come back to afterwards as the percent-encoded
/// `rd` query parameter, following the oauth2-proxy convention.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct AuthUrls {
    sign_in_url: String,
    sign_out_url: String,
}

impl AuthUrls {
    #[must_use]
    pub fn new(sign_in_url: String, sign_out_url: String) -> Self {
        Self {
            sign_in_url,
            sign_out_url,
        }
    }

    #[must_use]
    pub fn login_url(&self, return_uri: &str) -> String {
        format!("{}?rd={}", self.sign_in_url, urlencoding::encode(return_uri))
    }

    #[must_use]
    pub fn logout_url(&self, return_uri: &str) -> String {
        format!(
            "{}?rd={}",
            self.sign_out_url,
            urlencoding::encode(return_uri)
        )
    }
}
