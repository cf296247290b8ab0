//! Checkout Launcher
//!
//! One click, one request, one redirect. Nothing is retried, de-duplicated or
//! cancelled; a failure comes back as `Err` for the caller to report.

use crate::backend::SessionBackend;
use crate::config::{Plan, PlanPrice, PriceCatalog, PriceId};
use crate::error::{LaunchError, Result};
use crate::navigator::Navigator;
use crate::session::Redirect;
use crate::trigger::Trigger;

pub struct CheckoutLauncher<B, N> {
    backend: B,
    navigator: N,
    catalog: PriceCatalog,
}

impl<B: SessionBackend, N: Navigator> CheckoutLauncher<B, N> {
    pub fn new(backend: B, navigator: N, catalog: PriceCatalog) -> Self {
        Self {
            backend,
            navigator,
            catalog,
        }
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    /// Start checkout for a plan slot.
    ///
    /// A slot without a price fails before any request is sent.
    pub async fn initiate_checkout(&self, plan: Plan) -> Result<Redirect> {
        match self.catalog.price(plan) {
            PlanPrice::Configured(price_id) => {
                tracing::info!(plan = %plan, price_id = %price_id, "Starting checkout");
                self.initiate_checkout_price(price_id).await
            }
            PlanPrice::NotConfigured => Err(LaunchError::PlanNotConfigured(plan)),
        }
    }

    /// Create a session for `price_id` and hand it to the processor client
    pub async fn initiate_checkout_price(&self, price_id: &PriceId) -> Result<Redirect> {
        let session_id = self.backend.create_checkout_session(price_id).await?;

        tracing::info!(session_id = %session_id, "Redirecting to hosted checkout");
        self.navigator.redirect_to_checkout(&session_id).await?;

        Ok(Redirect::Checkout(session_id))
    }

    /// Create a billing-portal session and navigate to it
    pub async fn initiate_billing_portal(&self) -> Result<Redirect> {
        let url = self.backend.create_portal_session().await?;

        tracing::info!(url = %url, "Redirecting to billing portal");
        self.navigator.assign_location(&url)?;

        Ok(Redirect::Location(url))
    }

    /// Run whatever a bound element's click stands for
    pub async fn launch(&self, trigger: Trigger) -> Result<Redirect> {
        match trigger {
            Trigger::Checkout(plan) => self.initiate_checkout(plan).await,
            Trigger::ManageBilling => self.initiate_billing_portal().await,
        }
    }
}
