//! # bepaid-checkout
//!
//! Client for the bePaid hosted checkout API.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐  POST /checkouts   ┌─────────────────┐
//! │  Your Bot / │───────────────────▶│  bePaid Hosted  │
//! │    Site     │◀───────────────────│  Checkout API   │
//! └─────────────┘  GET /checkouts/   └─────────────────┘
//!                  {token}/status
//! ```
//!
//! Every reply from the provider, whatever its HTTP status or body, comes
//! back as a [`CheckoutResult`]. Only configuration, transport and
//! cancellation problems are returned as [`CheckoutError`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bepaid_checkout::{CheckoutClient, PaymentRequest};
//!
//! let client = CheckoutClient::from_env()?;
//!
//! let created = client
//!     .create_payment(&PaymentRequest::new().amount(100).currency("BYN"), false)
//!     .await?;
//!
//! // Redirect the customer to: created.redirect_url()
//! if let Some(token) = created.checkout_token() {
//!     let status = client.get_payment_status(token, false).await?;
//! }
//! ```

pub mod auth;
mod checkout;
mod config;
mod error;
pub mod payment;
mod response;
pub mod transport;

pub use checkout::{API_BASE_URL, CheckoutClient};
pub use config::CheckoutConfig;
pub use error::{CheckoutError, Result};
pub use payment::{CheckoutPayload, Credentials, PaymentDetails, PaymentRequest, SiteConfig};
pub use response::{
    CheckoutResult, DebugPrinter, INVALID_JSON_SENTINEL, StderrPrinter, normalize, write_pretty,
};
pub use transport::{HttpTransport, MockTransport, ReqwestTransport};
