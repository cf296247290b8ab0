//! Trigger Resolution
//!
//! Decides which page elements get a click handler. Generic over the
//! element type so the rules hold the same with DOM nodes or test values.

use crate::config::{ElementIds, Plan, PlanPrice, PriceCatalog};
use crate::error::{LaunchError, Result};

/// What a click on a bound element starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Checkout(Plan),
    ManageBilling,
}

/// An element found on the page together with its trigger
#[derive(Clone, Debug)]
pub struct BoundTrigger<E> {
    pub trigger: Trigger,
    pub element_id: String,
    pub element: E,
}

/// Look up every trigger element.
///
/// - basic checkout: required, missing → `ElementMissing`
/// - premium checkout: bound only when present and its price is configured
/// - manage billing: bound only when present
pub fn resolve_triggers<E, F>(ids: &ElementIds, catalog: &PriceCatalog, lookup: F) -> Result<Vec<BoundTrigger<E>>>
where
    F: Fn(&str) -> Option<E>,
{
    let mut bound = Vec::with_capacity(3);

    let basic_id = ids.checkout(Plan::Basic);
    let element = lookup(basic_id).ok_or_else(|| LaunchError::ElementMissing(basic_id.to_string()))?;
    bound.push(BoundTrigger {
        trigger: Trigger::Checkout(Plan::Basic),
        element_id: basic_id.to_string(),
        element,
    });

    let premium_id = ids.checkout(Plan::Premium);
    match (lookup(premium_id), catalog.price(Plan::Premium)) {
        (Some(element), PlanPrice::Configured(_)) => bound.push(BoundTrigger {
            trigger: Trigger::Checkout(Plan::Premium),
            element_id: premium_id.to_string(),
            element,
        }),
        (Some(_), PlanPrice::NotConfigured) => {
            tracing::info!(element = %premium_id, "Premium plan has no price; button left disabled");
        }
        (None, _) => {
            tracing::debug!(element = %premium_id, "No premium checkout element on page");
        }
    }

    let billing_id = ids.manage_billing.as_str();
    if let Some(element) = lookup(billing_id) {
        bound.push(BoundTrigger {
            trigger: Trigger::ManageBilling,
            element_id: billing_id.to_string(),
            element,
        });
    } else {
        tracing::debug!(element = %billing_id, "No billing element on page");
    }

    Ok(bound)
}
