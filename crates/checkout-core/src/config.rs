//! Launcher Configuration
//!
//! The publishable key, catalog price identifiers, endpoint paths and page
//! element ids. Everything the page script used to hold as module-level
//! constants is injected here once at startup.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LaunchError, Result};

pub const DEFAULT_CHECKOUT_SESSION_PATH: &str = "/create-checkout-session";
pub const DEFAULT_PORTAL_SESSION_PATH: &str = "/create-portal-session";

/// Catalog key identifying a purchasable price
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceId(String);

impl PriceId {
    /// Wrap a price identifier, trimming surrounding whitespace.
    /// Returns `None` for an empty identifier.
    pub fn new(s: impl AsRef<str>) -> Option<Self> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PriceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plan slots offered on the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Premium,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Premium => "premium",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price assigned to a plan slot.
///
/// An empty identifier in configuration means the slot is switched off:
/// it is never requested and its button is never bound.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PlanPrice {
    Configured(PriceId),
    #[default]
    NotConfigured,
}

impl PlanPrice {
    pub fn from_raw(raw: &str) -> Self {
        PriceId::new(raw).map_or(PlanPrice::NotConfigured, PlanPrice::Configured)
    }

    pub fn price_id(&self) -> Option<&PriceId> {
        match self {
            PlanPrice::Configured(id) => Some(id),
            PlanPrice::NotConfigured => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, PlanPrice::Configured(_))
    }
}

impl Serialize for PlanPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.price_id().map_or("", PriceId::as_str))
    }
}

impl<'de> Deserialize<'de> for PlanPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(PlanPrice::NotConfigured, PlanPrice::from_raw))
    }
}

/// Prices for every plan slot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceCatalog {
    pub basic: PlanPrice,
    pub premium: PlanPrice,
}

impl PriceCatalog {
    pub fn price(&self, plan: Plan) -> &PlanPrice {
        match plan {
            Plan::Basic => &self.basic,
            Plan::Premium => &self.premium,
        }
    }
}

/// DOM ids of the trigger elements
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub checkout_basic: String,
    pub checkout_premium: String,
    pub manage_billing: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            checkout_basic: "checkout-basic".into(),
            checkout_premium: "checkout-premium".into(),
            manage_billing: "manage-billing".into(),
        }
    }
}

impl ElementIds {
    pub fn checkout(&self, plan: Plan) -> &str {
        match plan {
            Plan::Basic => &self.checkout_basic,
            Plan::Premium => &self.checkout_premium,
        }
    }
}

/// Full launcher configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherConfig {
    /// Processor publishable key (`pk_...`)
    pub publishable_key: String,

    #[serde(default)]
    pub basic_price_id: PlanPrice,

    #[serde(default)]
    pub premium_price_id: PlanPrice,

    #[serde(default = "default_checkout_session_path")]
    pub checkout_session_path: String,

    #[serde(default = "default_portal_session_path")]
    pub portal_session_path: String,

    #[serde(default)]
    pub elements: ElementIds,

    /// Tracing filter directive, e.g. `info` or `debug,reqwest=warn`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_checkout_session_path() -> String {
    DEFAULT_CHECKOUT_SESSION_PATH.into()
}

fn default_portal_session_path() -> String {
    DEFAULT_PORTAL_SESSION_PATH.into()
}

fn default_log_level() -> String {
    "info".into()
}

impl LauncherConfig {
    /// Config with only a publishable key; everything else defaulted
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            basic_price_id: PlanPrice::NotConfigured,
            premium_price_id: PlanPrice::NotConfigured,
            checkout_session_path: default_checkout_session_path(),
            portal_session_path: default_portal_session_path(),
            elements: ElementIds::default(),
            log_level: default_log_level(),
        }
    }

    /// Parse the JSON config block embedded in the page
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| LaunchError::Config(format!("invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source using the environment variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let publishable_key = lookup("STRIPE_PUBLISHABLE_KEY")
            .ok_or_else(|| LaunchError::Config("STRIPE_PUBLISHABLE_KEY not set".into()))?;

        let mut config = Self::new(publishable_key);
        config.basic_price_id = PlanPrice::from_raw(&lookup("BASIC_PRICE_ID").unwrap_or_default());
        config.premium_price_id = PlanPrice::from_raw(&lookup("PREMIUM_PRICE_ID").unwrap_or_default());
        if let Some(path) = lookup("CHECKOUT_SESSION_PATH") {
            config.checkout_session_path = path;
        }
        if let Some(path) = lookup("PORTAL_SESSION_PATH") {
            config.portal_session_path = path;
        }
        if let Some(level) = lookup("CHECKOUT_LOG") {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let key = self.publishable_key.trim();
        if key.starts_with("sk_") || key.starts_with("rk_") {
            return Err(LaunchError::Config(
                "a secret key must never be embedded in the page; use the publishable key".into(),
            ));
        }
        if !key.starts_with("pk_") {
            return Err(LaunchError::Config("publishable key must start with pk_".into()));
        }

        for (name, path) in [
            ("checkoutSessionPath", &self.checkout_session_path),
            ("portalSessionPath", &self.portal_session_path),
        ] {
            if !path.starts_with('/') {
                return Err(LaunchError::Config(format!("{name} must start with '/': {path:?}")));
            }
            // `//host` and `/\host` resolve to another origin
            if path.starts_with("//") || path.starts_with("/\\") {
                return Err(LaunchError::Config(format!("{name} must stay on the page origin: {path:?}")));
            }
        }

        if self.elements.checkout_basic.trim().is_empty() {
            return Err(LaunchError::Config("elements.checkoutBasic must not be empty".into()));
        }

        if !self.basic_price_id.is_configured() {
            tracing::warn!("No basic price configured; checkout clicks will fail");
        }

        Ok(())
    }

    pub fn catalog(&self) -> PriceCatalog {
        PriceCatalog {
            basic: self.basic_price_id.clone(),
            premium: self.premium_price_id.clone(),
        }
    }
}
