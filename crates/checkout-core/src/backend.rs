//! Session Backend
//!
//! The trusted service that turns a price into a checkout session and a
//! customer into a billing-portal link. It is owned elsewhere; this module
//! only speaks its two POST endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::config::{LauncherConfig, PriceId};
use crate::error::{LaunchError, Result};
use crate::session::{CheckoutSessionRequest, CheckoutSessionResponse, PortalSessionResponse, SessionId};

/// Session-creation endpoints
#[async_trait(?Send)]
pub trait SessionBackend {
    /// `POST {priceId}` and return the new checkout session id
    async fn create_checkout_session(&self, price_id: &PriceId) -> Result<SessionId>;

    /// `POST` with no body and return the billing-portal URL
    async fn create_portal_session(&self) -> Result<String>;
}

/// HTTP implementation over `reqwest`
#[derive(Clone, Debug)]
pub struct HttpSessionBackend {
    client: Client,
    checkout_url: Url,
    portal_url: Url,
}

impl HttpSessionBackend {
    /// Resolve the configured endpoint paths against `base_url`
    pub fn new(base_url: &str, config: &LauncherConfig) -> Result<Self> {
        Self::with_client(Client::new(), base_url, config)
    }

    pub fn with_client(client: Client, base_url: &str, config: &LauncherConfig) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| LaunchError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| LaunchError::Config(format!("invalid endpoint path {path:?}: {e}")))
        };

        Ok(Self {
            checkout_url: join(&config.checkout_session_path)?,
            portal_url: join(&config.portal_session_path)?,
            client,
        })
    }

    pub fn checkout_url(&self) -> &Url {
        &self.checkout_url
    }

    pub fn portal_url(&self) -> &Url {
        &self.portal_url
    }
}

#[async_trait(?Send)]
impl SessionBackend for HttpSessionBackend {
    async fn create_checkout_session(&self, price_id: &PriceId) -> Result<SessionId> {
        tracing::debug!(price_id = %price_id, url = %self.checkout_url, "Creating checkout session");

        let response = self
            .client
            .post(self.checkout_url.clone())
            .json(&CheckoutSessionRequest {
                price_id: price_id.clone(),
            })
            .send()
            .await?;

        read_json::<CheckoutSessionResponse>(response).await?.into_session_id()
    }

    async fn create_portal_session(&self) -> Result<String> {
        tracing::debug!(url = %self.portal_url, "Creating billing portal session");

        let response = self.client.post(self.portal_url.clone()).send().await?;

        read_json::<PortalSessionResponse>(response).await?.into_url()
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(LaunchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| LaunchError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn config() -> LauncherConfig {
        LauncherConfig::new("pk_test_backend")
    }

    #[test]
    fn test_endpoint_urls() {
        let backend = HttpSessionBackend::new("https://shop.example.com/pricing", &config()).unwrap();
        assert_eq!(backend.checkout_url().as_str(), "https://shop.example.com/create-checkout-session");
        assert_eq!(backend.portal_url().as_str(), "https://shop.example.com/create-portal-session");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpSessionBackend::new("not a url", &config()).unwrap_err();
        assert!(matches!(err, LaunchError::Config(_)));
    }

    #[tokio::test]
    async fn test_checkout_session_posts_price_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create-checkout-session"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"priceId": "price_basic"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sessionId": "cs_test_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let backend = HttpSessionBackend::new(&server.uri(), &config()).unwrap();
        let session = backend
            .create_checkout_session(&PriceId::new("price_basic").unwrap())
            .await
            .unwrap();

        assert_eq!(session.as_str(), "cs_test_1");
    }

    #[tokio::test]
    async fn test_portal_session_posts_without_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create-portal-session"))
            .and(|request: &Request| request.body.is_empty())
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"url": "https://billing.stripe.com/p/session/abc"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let backend = HttpSessionBackend::new(&server.uri(), &config()).unwrap();
        let url = backend.create_portal_session().await.unwrap();

        assert_eq!(url, "https://billing.stripe.com/p/session/abc");
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create-checkout-session"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "No such price"})))
            .mount(&server)
            .await;

        let backend = HttpSessionBackend::new(&server.uri(), &config()).unwrap();
        let err = backend
            .create_checkout_session(&PriceId::new("price_gone").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::Status { status: 400, .. }));
        assert_eq!(err.backend_message().as_deref(), Some("No such price"));
    }

    #[tokio::test]
    async fn test_error_status_reads_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create-checkout-session"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid amount. Must be a positive integer representing cents."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let backend = HttpSessionBackend::new(&server.uri(), &config()).unwrap();
        let err = backend
            .create_checkout_session(&PriceId::new("price_basic").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::Status { status: 400, .. }));
        assert_eq!(
            err.backend_message().as_deref(),
            Some("Invalid amount. Must be a positive integer representing cents.")
        );
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_missing_field_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create-portal-session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"link": "https://x"})))
            .mount(&server)
            .await;

        let backend = HttpSessionBackend::new(&server.uri(), &config()).unwrap();
        let err = backend.create_portal_session().await.unwrap_err();

        assert!(matches!(err, LaunchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Unpooled, so the port really closes on drop
        let server = MockServer::builder().start().await;
        let uri = server.uri();
        drop(server);

        let backend = HttpSessionBackend::new(&uri, &config()).unwrap();
        let err = backend.create_portal_session().await.unwrap_err();

        assert!(matches!(err, LaunchError::Network(_)));
        assert!(err.is_retryable());
    }
}
