//! Response Normalization
//!
//! Every provider reply becomes a [`CheckoutResult`], whatever its status or
//! body. Only transport faults escape as errors.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const INVALID_JSON_SENTINEL: &str = "Invalid JSON response";

/// Outcome of a single checkout API call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResult {
    /// HTTP status matched the operation's expected status
    pub ok: bool,

    /// Decoded body, or `{"error": "Invalid JSON response"}`
    pub response: Value,
}

impl CheckoutResult {
    /// `checkout.token` from the provider reply, if any
    pub fn checkout_token(&self) -> Option<&str> {
        self.response.pointer("/checkout/token")?.as_str()
    }

    /// `checkout.redirect_url` from the provider reply, if any
    pub fn redirect_url(&self) -> Option<&str> {
        self.response.pointer("/checkout/redirect_url")?.as_str()
    }
}

/// Decode `body` and compare `status` against `expected`
pub fn normalize(status: u16, body: &[u8], expected: u16) -> CheckoutResult {
    let response = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(status, error = %e, "Checkout API returned a non-JSON body");
            json!({ "error": INVALID_JSON_SENTINEL })
        }
    };

    let ok = status == expected;
    if !ok {
        tracing::warn!(status, expected, "Checkout API status mismatch");
    }

    CheckoutResult { ok, response }
}

/// Side-effect hook for `debug` calls
pub trait DebugPrinter: Send + Sync {
    fn print(&self, value: &Value);
}

/// Write `value` as 2-space indented JSON followed by a newline.
/// Non-ASCII text is kept literal.
pub fn write_pretty<W: Write>(mut writer: W, value: &Value) -> std::io::Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    writeln!(writer, "{rendered}")
}

/// Pretty-prints to stderr
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrPrinter;

impl DebugPrinter for StderrPrinter {
    fn print(&self, value: &Value) {
        if let Err(e) = write_pretty(std::io::stderr().lock(), value) {
            tracing::warn!(error = %e, "Failed to print checkout API response");
        }
    }
}
