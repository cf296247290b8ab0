//! Session Wire Types
//!
//! JSON shapes exchanged with the session-creation backend.

use serde::{Deserialize, Serialize};

use crate::config::PriceId;
use crate::error::{LaunchError, Result};

/// Opaque checkout session token issued by the processor
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `POST /create-checkout-session`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub price_id: PriceId,
}

/// Reply of `POST /create-checkout-session`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub session_id: SessionId,
}

impl CheckoutSessionResponse {
    pub fn into_session_id(self) -> Result<SessionId> {
        if self.session_id.as_str().trim().is_empty() {
            return Err(LaunchError::MalformedResponse("empty sessionId".into()));
        }
        Ok(self.session_id)
    }
}

/// Reply of `POST /create-portal-session`
#[derive(Clone, Debug, Deserialize)]
pub struct PortalSessionResponse {
    pub url: String,
}

impl PortalSessionResponse {
    pub fn into_url(self) -> Result<String> {
        if self.url.trim().is_empty() {
            return Err(LaunchError::MalformedResponse("empty portal url".into()));
        }
        Ok(self.url)
    }
}

/// Navigation performed by a launcher operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Handed to the processor's hosted checkout
    Checkout(SessionId),
    /// Page location assigned directly
    Location(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request = CheckoutSessionRequest {
            price_id: PriceId::new("price_123").unwrap(),
        };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"priceId":"price_123"}"#);
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let response: CheckoutSessionResponse =
            serde_json::from_str(r#"{"sessionId":"cs_test_a1","url":"https://checkout.stripe.com/x"}"#).unwrap();
        assert_eq!(response.into_session_id().unwrap().as_str(), "cs_test_a1");
    }

    #[test]
    fn test_empty_session_id_rejected() {
        let response: CheckoutSessionResponse = serde_json::from_str(r#"{"sessionId":""}"#).unwrap();
        assert!(matches!(response.into_session_id(), Err(LaunchError::MalformedResponse(_))));
    }

    #[test]
    fn test_empty_portal_url_rejected() {
        let response: PortalSessionResponse = serde_json::from_str(r#"{"url":" "}"#).unwrap();
        assert!(matches!(response.into_url(), Err(LaunchError::MalformedResponse(_))));
    }
}
