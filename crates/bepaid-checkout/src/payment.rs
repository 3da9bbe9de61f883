//! Payment Data Model
//!
//! Input data for a checkout, the intermediate param view and the nested
//! payload that goes on the wire.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TRANSACTION_TYPE: &str = "payment";
pub const DEFAULT_BOT_NAME: &str = "BepaidClient";
pub const DEFAULT_ORDER_DESCRIPTION: &str = "Оплата абонемента";
pub const DEFAULT_AMOUNT: i64 = 1;
pub const DEFAULT_CURRENCY: &str = "BYN";
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Shop credentials issued by bePaid
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_token: String,
    shop_id: i64,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>, shop_id: i64) -> Self {
        Self {
            api_token: api_token.into(),
            shop_id,
        }
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn shop_id(&self) -> i64 {
        self.shop_id
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"***")
            .field("shop_id", &self.shop_id)
            .finish()
    }
}

/// The merchant's own site, used to build callback URLs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    base_url: String,
}

impl SiteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Payment intent supplied by the caller.
///
/// Every field is optional; [`PaymentRequest::resolve`] fills the gaps with
/// the documented defaults. Unknown keys are rejected on deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentRequest {
    /// Sandbox transaction (default `false`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,

    /// Transaction type (default `"payment"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,

    /// Bot name appended to the success URL (default `"BepaidClient"`)
    #[serde(default, alias = "bot", skip_serializing_if = "Option::is_none")]
    pub bot_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Customer first name shown on the checkout page
    #[serde(default, alias = "user", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Order description (default `"Оплата абонемента"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_description: Option<String>,

    /// Amount in minor units (default `1`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    /// ISO 4217 code (default `"BYN"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// ISO 639-1 code (default `"ru"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl PaymentRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test(mut self, test: bool) -> Self {
        self.test = Some(test);
        self
    }

    pub fn transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }

    pub fn bot_name(mut self, bot_name: impl Into<String>) -> Self {
        self.bot_name = Some(bot_name.into());
        self
    }

    pub fn pay_id(mut self, pay_id: i64) -> Self {
        self.pay_id = Some(pay_id);
        self
    }

    pub fn tracking_id(mut self, tracking_id: i64) -> Self {
        self.tracking_id = Some(tracking_id);
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn order_description(mut self, order_description: impl Into<String>) -> Self {
        self.order_description = Some(order_description.into());
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Apply defaults to every absent field
    pub fn resolve(&self) -> PaymentDetails {
        let defaults = PaymentDetails::default();
        PaymentDetails {
            test: self.test.unwrap_or(defaults.test),
            transaction_type: self
                .transaction_type
                .clone()
                .unwrap_or(defaults.transaction_type),
            bot_name: self.bot_name.clone().unwrap_or(defaults.bot_name),
            pay_id: self.pay_id.unwrap_or(defaults.pay_id),
            tracking_id: self.tracking_id.unwrap_or(defaults.tracking_id),
            user_id: self.user_id.unwrap_or(defaults.user_id),
            user_name: self.user_name.clone().unwrap_or(defaults.user_name),
            description: self.description.clone().unwrap_or(defaults.description),
            order_description: self
                .order_description
                .clone()
                .unwrap_or(defaults.order_description),
            amount: self.amount.unwrap_or(defaults.amount),
            currency: self.currency.clone().unwrap_or(defaults.currency),
            language: self.language.clone().unwrap_or(defaults.language),
        }
    }
}

/// A [`PaymentRequest`] with every default applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentDetails {
    pub test: bool,
    pub transaction_type: String,
    pub bot_name: String,
    pub pay_id: i64,
    pub tracking_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub description: String,
    pub order_description: String,
    pub amount: i64,
    pub currency: String,
    pub language: String,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            test: false,
            transaction_type: DEFAULT_TRANSACTION_TYPE.into(),
            bot_name: DEFAULT_BOT_NAME.into(),
            pay_id: 0,
            tracking_id: 0,
            user_id: 0,
            user_name: String::new(),
            description: String::new(),
            order_description: DEFAULT_ORDER_DESCRIPTION.into(),
            amount: DEFAULT_AMOUNT,
            currency: DEFAULT_CURRENCY.into(),
            language: DEFAULT_LANGUAGE.into(),
        }
    }
}

/// Intermediate view joining shop settings with the caller's identifiers.
///
/// Feeds the payload builder; never sent as is.
#[derive(Clone, PartialEq, Eq)]
pub struct CheckoutParam {
    pub wallet_token: String,
    pub wallet_shop_id: i64,
    pub bot: String,
    pub pay_id: i64,
    pub description: String,
    pub user_id: i64,
    pub web_site: String,
    pub user: String,
}

impl std::fmt::Debug for CheckoutParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutParam")
            .field("wallet_token", &"***")
            .field("wallet_shop_id", &self.wallet_shop_id)
            .field("bot", &self.bot)
            .field("pay_id", &self.pay_id)
            .field("description", &self.description)
            .field("user_id", &self.user_id)
            .field("web_site", &self.web_site)
            .field("user", &self.user)
            .finish()
    }
}

/// Request body for `POST /checkouts`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub checkout: Checkout,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub transaction_type: String,
    pub test: bool,
    pub order: Order,
    pub customer: Customer,
    pub settings: Settings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Minor units
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub tracking_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub notification_url: String,
    pub success_url: String,
    pub decline_url: String,
    pub fail_url: String,
    pub cancel_url: String,
    pub language: String,
}

impl Settings {
    /// Callback URLs rooted at the merchant site
    pub fn for_site(web_site: &str, bot: &str, language: impl Into<String>) -> Self {
        let fail_url = format!("{web_site}/fail");
        Self {
            notification_url: format!("{web_site}/BepaidBy"),
            success_url: format!("{web_site}/success?bot={bot}"),
            decline_url: fail_url.clone(),
            fail_url: fail_url.clone(),
            cancel_url: fail_url,
            language: language.into(),
        }
    }
}
