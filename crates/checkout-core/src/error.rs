//! Launcher Error Types

use thiserror::Error;

use crate::config::Plan;

/// Result type alias
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Everything that can stop a click from ending in a redirect
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Request could not be sent or no response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend answered 2xx but the body was not the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Plan slot has no price identifier
    #[error("Plan not configured: {0}")]
    PlanNotConfigured(Plan),

    /// Required page element is absent
    #[error("Element not found: #{0}")]
    ElementMissing(String),

    /// Processor client refused or failed the redirect
    #[error("Redirect failed: {0}")]
    Redirect(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LaunchError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            LaunchError::Network(_) => true,
            LaunchError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The backend's own failure text: `{"detail": "..."}`, else `{"error": "..."}`
    pub fn backend_message(&self) -> Option<String> {
        let LaunchError::Status { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        ["detail", "error"]
            .iter()
            .find_map(|field| value[*field].as_str())
            .map(str::to_owned)
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &'static str {
        match self {
            LaunchError::Network(_) => "We couldn't reach the payment service. Check your connection and try again.",
            LaunchError::Status { status, .. } if *status >= 500 => "The payment service is having trouble. Please try again.",
            LaunchError::Status { .. } => "This purchase couldn't be started.",
            LaunchError::MalformedResponse(_) => "The payment service sent an unexpected reply.",
            LaunchError::PlanNotConfigured(_) => "This plan isn't available yet.",
            LaunchError::Redirect(_) => "We couldn't open the checkout page. Please try again.",
            LaunchError::ElementMissing(_) | LaunchError::Config(_) => "Checkout is unavailable on this page.",
        }
    }
}

impl From<reqwest::Error> for LaunchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LaunchError::MalformedResponse(err.to_string())
        } else {
            LaunchError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(LaunchError::Network("reset".into()).is_retryable());
        assert!(LaunchError::Status { status: 502, body: String::new() }.is_retryable());
        assert!(!LaunchError::Status { status: 400, body: String::new() }.is_retryable());
        assert!(!LaunchError::PlanNotConfigured(Plan::Premium).is_retryable());
    }

    #[test]
    fn test_backend_message() {
        let err = LaunchError::Status {
            status: 400,
            body: r#"{"error":"No such price: 'price_x'"}"#.into(),
        };
        assert_eq!(err.backend_message().as_deref(), Some("No such price: 'price_x'"));

        let plain = LaunchError::Status { status: 500, body: "Internal Server Error".into() };
        assert_eq!(plain.backend_message(), None);
    }

    #[test]
    fn test_backend_message_prefers_detail() {
        let err = LaunchError::Status {
            status: 400,
            body: r#"{"detail":"Unsupported currency.","error":"bad request"}"#.into(),
        };
        assert_eq!(err.backend_message().as_deref(), Some("Unsupported currency."));

        let structured = LaunchError::Status {
            status: 422,
            body: r#"{"detail":[{"loc":["body","priceId"],"msg":"field required"}]}"#.into(),
        };
        assert_eq!(structured.backend_message(), None);
    }

    #[test]
    fn test_user_message() {
        let server = LaunchError::Status { status: 503, body: String::new() };
        let client = LaunchError::Status { status: 400, body: String::new() };
        assert_eq!(server.user_message(), "The payment service is having trouble. Please try again.");
        assert_eq!(client.user_message(), "This purchase couldn't be started.");
        assert_ne!(server.user_message(), client.user_message());

        assert_eq!(
            LaunchError::PlanNotConfigured(Plan::Premium).user_message(),
            "This plan isn't available yet."
        );
        assert_eq!(
            LaunchError::Redirect("Invalid session".into()).user_message(),
            "We couldn't open the checkout page. Please try again."
        );
        assert_eq!(
            LaunchError::Network("reset".into()).user_message(),
            "We couldn't reach the payment service. Check your connection and try again."
        );
        assert_eq!(
            LaunchError::ElementMissing("checkout-basic".into()).user_message(),
            LaunchError::Config("bad".into()).user_message()
        );
    }

    #[test]
    fn test_display() {
        let err = LaunchError::PlanNotConfigured(Plan::Premium);
        assert_eq!(err.to_string(), "Plan not configured: premium");
        assert_eq!(LaunchError::ElementMissing("checkout-basic".into()).to_string(), "Element not found: #checkout-basic");
    }
}
