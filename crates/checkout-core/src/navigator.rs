//! Navigation seam
//!
//! In the browser this is Stripe.js plus `window.location`.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::SessionId;

#[async_trait(?Send)]
pub trait Navigator {
    /// Hand the session to the processor client, which leaves the page
    async fn redirect_to_checkout(&self, session_id: &SessionId) -> Result<()>;

    /// Set the page location to exactly `url`
    fn assign_location(&self, url: &str) -> Result<()>;
}
