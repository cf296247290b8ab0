//! # checkout-core
//!
//! Launches hosted checkout and billing-portal sessions from a checkout page.
//!
//! ## Flow
//!
//! ```text
//! click (checkout) ──POST {priceId}──▶ backend ──{sessionId}──▶ stripe.redirectToCheckout
//! click (billing)  ──POST (no body)──▶ backend ──{url}────────▶ window.location = url
//! ```
//!
//! The backend and the navigation target are both seams: `SessionBackend`
//! (HTTP via `reqwest`) and `Navigator` (Stripe.js + `window.location` in the
//! browser crate). Every failure comes back as a `LaunchError`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutLauncher, HttpSessionBackend, LauncherConfig, Plan};
//!
//! let config = LauncherConfig::from_json(page_config_json)?;
//! let backend = HttpSessionBackend::new(&origin, &config)?;
//! let launcher = CheckoutLauncher::new(backend, navigator, config.catalog());
//!
//! launcher.initiate_checkout(Plan::Basic).await?;
//! ```

mod backend;
mod config;
mod error;
mod launcher;
mod navigator;
mod session;
mod trigger;

pub use backend::{HttpSessionBackend, SessionBackend};
pub use config::{ElementIds, LauncherConfig, Plan, PlanPrice, PriceCatalog, PriceId};
pub use error::{LaunchError, Result};
pub use launcher::CheckoutLauncher;
pub use navigator::Navigator;
pub use session::{CheckoutSessionRequest, CheckoutSessionResponse, PortalSessionResponse, Redirect, SessionId};
pub use trigger::{BoundTrigger, Trigger, resolve_triggers};
