use base64::{Engine, prelude::BASE64_STANDARD};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::{CheckoutError, Result};
use crate::payment::Credentials;

pub const API_VERSION: &str = "2";

/// Base64 of `"{shop_id}:{api_token}"`
pub fn basic_auth_value(shop_id: i64, api_token: &str) -> String {
    BASE64_STANDARD.encode(format!("{shop_id}:{api_token}"))
}

/// Header set sent with every checkout API call
pub fn checkout_headers(credentials: &Credentials) -> Result<HeaderMap> {
    let auth = basic_auth_value(credentials.shop_id(), credentials.api_token());
    let mut authorization = HeaderValue::from_str(&format!("Basic {auth}"))
        .map_err(|e| CheckoutError::Config(format!("invalid credentials header: {e}")))?;
    authorization.set_sensitive(true);

    let mut map = HeaderMap::new();
    map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    map.insert(ACCEPT, HeaderValue::from_static("application/json"));
    map.insert(
        HeaderName::from_static("x-api-version"),
        HeaderValue::from_static(API_VERSION),
    );
    map.insert(AUTHORIZATION, authorization);
    Ok(map)
}
