//! Environment Configuration

use crate::error::{CheckoutError, Result};
use crate::payment::{Credentials, SiteConfig};

pub const TOKEN_VAR: &str = "TOKEN";
pub const SHOP_ID_VAR: &str = "SHOP_ID";
pub const SITE_URL_VAR: &str = "SITE_URL";

/// Validated settings needed to construct a [`CheckoutClient`](crate::CheckoutClient)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub credentials: Credentials,
    pub site: SiteConfig,
}

impl CheckoutConfig {
    pub fn new(api_token: impl Into<String>, shop_id: i64, site_url: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_token, shop_id),
            site: SiteConfig::new(site_url),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = read(TOKEN_VAR);
        let shop_id = read(SHOP_ID_VAR);
        let site_url = read(SITE_URL_VAR);

        let (Some(token), Some(shop_id), Some(site_url)) = (token, shop_id, site_url) else {
            let missing: Vec<&str> = [TOKEN_VAR, SHOP_ID_VAR, SITE_URL_VAR]
                .into_iter()
                .filter(|key| read(*key).is_none())
                .collect();
            return Err(CheckoutError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        };

        let shop_id = shop_id.trim().parse::<i64>().map_err(|_| {
            CheckoutError::Config(format!("{SHOP_ID_VAR} must be an integer, got {shop_id:?}"))
        })?;

        Ok(Self::new(token, shop_id, site_url))
    }
}
