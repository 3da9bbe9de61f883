//! bePaid Checkout Client
//!
//! Implements the hosted checkout flow: create a checkout, redirect the
//! customer, then poll the checkout status.

use std::future::Future;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::HeaderMap;

use crate::auth::checkout_headers;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::payment::{
    Checkout, CheckoutParam, CheckoutPayload, Credentials, Customer, Order, PaymentDetails,
    PaymentRequest, Settings, SiteConfig,
};
use crate::response::{CheckoutResult, DebugPrinter, StderrPrinter, normalize};
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest};

pub const API_BASE_URL: &str = "https://checkout.bepaid.by/ctp/api";

const CREATED: u16 = 201;
const OK: u16 = 200;

/// bePaid checkout API client.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent calls.
pub struct CheckoutClient<T: HttpTransport = ReqwestTransport> {
    credentials: Credentials,
    site: SiteConfig,
    api_base: String,
    transport: T,
    printer: Arc<dyn DebugPrinter>,
}

impl CheckoutClient<ReqwestTransport> {
    /// Create a client talking to the production API
    pub fn new(
        api_token: impl Into<String>,
        shop_id: i64,
        site_url: impl Into<String>,
    ) -> Result<Self> {
        Self::from_config(CheckoutConfig::new(api_token, shop_id, site_url))
    }

    pub fn from_config(config: CheckoutConfig) -> Result<Self> {
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(CheckoutConfig::from_env()?)
    }
}

impl<T: HttpTransport> CheckoutClient<T> {
    pub fn with_transport(config: CheckoutConfig, transport: T) -> Self {
        Self {
            credentials: config.credentials,
            site: config.site,
            api_base: API_BASE_URL.to_string(),
            transport,
            printer: Arc::new(StderrPrinter),
        }
    }

    /// Point the client at another API root (sandbox proxies, tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the sink used by `debug` calls
    pub fn with_debug_printer(mut self, printer: Arc<dyn DebugPrinter>) -> Self {
        self.printer = printer;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Auth and content headers, recomputed per call
    pub fn headers(&self) -> Result<HeaderMap> {
        checkout_headers(&self.credentials)
    }

    pub fn build_param(&self, details: &PaymentDetails) -> CheckoutParam {
        CheckoutParam {
            wallet_token: self.credentials.api_token().to_string(),
            wallet_shop_id: self.credentials.shop_id(),
            bot: details.bot_name.clone(),
            pay_id: details.pay_id,
            description: details.description.clone(),
            user_id: details.user_id,
            web_site: self.site.base_url().to_string(),
            user: details.user_name.clone(),
        }
    }

    pub fn build_payload(&self, details: &PaymentDetails, param: &CheckoutParam) -> CheckoutPayload {
        CheckoutPayload {
            checkout: Checkout {
                transaction_type: details.transaction_type.clone(),
                test: details.test,
                order: Order {
                    amount: details.amount,
                    currency: details.currency.clone(),
                    description: details.order_description.clone(),
                    tracking_id: details.tracking_id,
                },
                customer: Customer {
                    first_name: param.user.clone(),
                },
                settings: Settings::for_site(&param.web_site, &param.bot, details.language.clone()),
            },
        }
    }

    /// Create a checkout. Succeeds with `ok == true` on HTTP 201.
    #[tracing::instrument(skip_all)]
    pub async fn create_payment(&self, data: &PaymentRequest, debug: bool) -> Result<CheckoutResult> {
        let details = data.resolve();
        let param = self.build_param(&details);
        let payload = self.build_payload(&details, &param);
        tracing::debug!(
            pay_id = param.pay_id,
            user_id = param.user_id,
            tracking_id = details.tracking_id,
            amount = details.amount,
            currency = %details.currency,
            "Creating checkout"
        );

        let body = serde_json::to_vec(&payload)?;
        let url = format!("{}/checkouts", self.api_base);
        self.execute(Method::POST, url, Some(body), CREATED, debug)
            .await
    }

    /// Poll a checkout. Succeeds with `ok == true` on HTTP 200.
    ///
    /// The token is passed through as is.
    #[tracing::instrument(skip(self, debug))]
    pub async fn get_payment_status(
        &self,
        checkout_token: &str,
        debug: bool,
    ) -> Result<CheckoutResult> {
        let url = format!("{}/checkouts/{checkout_token}/status", self.api_base);
        self.execute(Method::GET, url, None, OK, debug).await
    }

    /// [`create_payment`](Self::create_payment), abandoned when `cancel` resolves first
    pub async fn create_payment_until<F>(
        &self,
        data: &PaymentRequest,
        debug: bool,
        cancel: F,
    ) -> Result<CheckoutResult>
    where
        F: Future<Output = ()>,
    {
        cancellable(self.create_payment(data, debug), cancel).await
    }

    /// [`get_payment_status`](Self::get_payment_status), abandoned when `cancel` resolves first
    pub async fn get_payment_status_until<F>(
        &self,
        checkout_token: &str,
        debug: bool,
        cancel: F,
    ) -> Result<CheckoutResult>
    where
        F: Future<Output = ()>,
    {
        cancellable(self.get_payment_status(checkout_token, debug), cancel).await
    }

    async fn execute(
        &self,
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
        expected: u16,
        debug: bool,
    ) -> Result<CheckoutResult> {
        tracing::debug!(%method, %url, "Checkout API request");
        let request = TransportRequest {
            method,
            url,
            headers: self.headers()?,
            body,
        };

        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "Checkout API response");

        let result = normalize(response.status, &response.body, expected);
        if debug {
            self.printer.print(&result.response);
        }
        Ok(result)
    }
}

async fn cancellable<O, F>(operation: O, cancel: F) -> Result<CheckoutResult>
where
    O: Future<Output = Result<CheckoutResult>>,
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        () = cancel => {
            tracing::info!("Checkout API request cancelled");
            Err(CheckoutError::Cancelled)
        }
        result = operation => result,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use reqwest::header::AUTHORIZATION;
    use serde_json::{Value, json};

    use super::*;
    use crate::transport::MockTransport;

    const SITE: &str = "https://shop.example.by";

    fn client(transport: MockTransport) -> CheckoutClient<MockTransport> {
        CheckoutClient::with_transport(CheckoutConfig::new("secret", 361, SITE), transport)
    }

    #[derive(Default)]
    struct RecordingPrinter(Mutex<Vec<Value>>);

    impl DebugPrinter for RecordingPrinter {
        fn print(&self, value: &Value) {
            self.0.lock().unwrap().push(value.clone());
        }
    }

    #[test]
    fn test_payload_defaults() {
        let client = client(MockTransport::respond(201, "{}"));
        let details = PaymentRequest::new().resolve();
        let param = client.build_param(&details);
        let payload = serde_json::to_value(client.build_payload(&details, &param)).unwrap();

        assert_eq!(
            payload,
            json!({
                "checkout": {
                    "transaction_type": "payment",
                    "test": false,
                    "order": {
                        "amount": 1,
                        "currency": "BYN",
                        "description": "Оплата абонемента",
                        "tracking_id": 0
                    },
                    "customer": {"first_name": ""},
                    "settings": {
                        "notification_url": "https://shop.example.by/BepaidBy",
                        "success_url": "https://shop.example.by/success?bot=BepaidClient",
                        "decline_url": "https://shop.example.by/fail",
                        "fail_url": "https://shop.example.by/fail",
                        "cancel_url": "https://shop.example.by/fail",
                        "language": "ru"
                    }
                }
            })
        );
    }

    #[test]
    fn test_param_view() {
        let client = client(MockTransport::respond(201, "{}"));
        let details = PaymentRequest::new()
            .bot_name("ShopBot")
            .pay_id(5)
            .user_id(7777777)
            .user_name("SevaShpun")
            .description("Оплата товара")
            .resolve();
        let param = client.build_param(&details);

        assert_eq!(param.wallet_token, "secret");
        assert_eq!(param.wallet_shop_id, 361);
        assert_eq!(param.bot, "ShopBot");
        assert_eq!(param.pay_id, 5);
        assert_eq!(param.user_id, 7777777);
        assert_eq!(param.user, "SevaShpun");
        assert_eq!(param.description, "Оплата товара");
        assert_eq!(param.web_site, SITE);

        let payload = client.build_payload(&details, &param);
        assert_eq!(payload.checkout.customer.first_name, "SevaShpun");
        assert_eq!(
            payload.checkout.settings.success_url,
            "https://shop.example.by/success?bot=ShopBot"
        );
    }

    #[tokio::test]
    async fn test_create_payment_created() {
        let client = client(MockTransport::json(201, &json!({"id": "abc"})));
        let result = client
            .create_payment(&PaymentRequest::new().amount(100), false)
            .await
            .unwrap();
        assert_eq!(
            result,
            CheckoutResult {
                ok: true,
                response: json!({"id": "abc"})
            }
        );

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "https://checkout.bepaid.by/ctp/api/checkouts");
        assert_eq!(request.headers[AUTHORIZATION], "Basic MzYxOnNlY3JldA==");
        assert_eq!(request.headers["x-api-version"], "2");

        let sent: Value = serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["checkout"]["order"]["amount"], 100);
        assert_eq!(sent["checkout"]["order"]["currency"], "BYN");
        assert_eq!(sent["checkout"]["settings"]["language"], "ru");
    }

    #[tokio::test]
    async fn test_create_payment_rejected_is_not_a_fault() {
        let client = client(MockTransport::json(422, &json!({"errors": "bad"})));
        let result = client.create_payment(&PaymentRequest::new(), false).await.unwrap();
        assert!(!result.ok);
        assert_eq!(result.response, json!({"errors": "bad"}));
    }

    #[tokio::test]
    async fn test_create_payment_expects_201_not_200() {
        let client = client(MockTransport::json(200, &json!({"id": "abc"})));
        let result = client.create_payment(&PaymentRequest::new(), false).await.unwrap();
        assert!(!result.ok);
    }

    #[tokio::test]
    async fn test_status_invalid_json() {
        let client = client(MockTransport::respond(200, ""));
        let result = client.get_payment_status("tok", false).await.unwrap();
        assert_eq!(
            result,
            CheckoutResult {
                ok: true,
                response: json!({"error": "Invalid JSON response"})
            }
        );
    }

    #[tokio::test]
    async fn test_status_request_shape() {
        let token = "5afba1ddc460c9aaee582eb962g7cab6fb151965e4e8d5afca49e9df1e1fa50f";
        let client = client(MockTransport::json(200, &json!({"checkout": {"status": "successful"}})));
        client.get_payment_status(token, false).await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(
            requests[0].url,
            format!("https://checkout.bepaid.by/ctp/api/checkouts/{token}/status")
        );
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_transport_fault_propagates() {
        let client = client(MockTransport::failing("connection refused"));

        let err = client.create_payment(&PaymentRequest::new(), false).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Transport(_)));

        let err = client.get_payment_status("tok", false).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Transport(_)));
    }

    #[tokio::test]
    async fn test_status_is_idempotent() {
        let client = client(MockTransport::json(200, &json!({"checkout": {"status": "incomplete"}})));
        let first = client.get_payment_status("tok", false).await.unwrap();
        let second = client.get_payment_status("tok", false).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_debug_printer_is_side_effect_only() {
        let printer = Arc::new(RecordingPrinter::default());
        let client = client(MockTransport::respond(200, "not json"))
            .with_debug_printer(printer.clone());

        let quiet = client.get_payment_status("tok", false).await.unwrap();
        assert!(printer.0.lock().unwrap().is_empty());

        let loud = client.get_payment_status("tok", true).await.unwrap();
        assert_eq!(quiet, loud);
        assert_eq!(
            *printer.0.lock().unwrap(),
            vec![json!({"error": "Invalid JSON response"})]
        );
    }

    #[tokio::test]
    async fn test_shared_transport_across_clients() {
        let transport = Arc::new(MockTransport::json(200, &json!({"checkout": {"status": "successful"}})));
        let first = CheckoutClient::with_transport(
            CheckoutConfig::new("secret", 361, SITE),
            Arc::clone(&transport),
        );
        let second = CheckoutClient::with_transport(
            CheckoutConfig::new("other", 362, SITE),
            Arc::clone(&transport),
        );

        first.get_payment_status("a", false).await.unwrap();
        second.get_payment_status("b", false).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.ends_with("/checkouts/a/status"));
        assert!(requests[1].url.ends_with("/checkouts/b/status"));
        assert_ne!(requests[0].headers[AUTHORIZATION], requests[1].headers[AUTHORIZATION]);
    }

    #[test]
    fn test_production_client_defaults() {
        let client = CheckoutClient::new("secret", 361, SITE).unwrap();
        assert_eq!(client.api_base(), API_BASE_URL);
        assert_eq!(client.credentials().shop_id(), 361);
    }

    #[tokio::test]
    async fn test_custom_api_base() {
        let client = client(MockTransport::json(200, &json!({})))
            .with_api_base("http://127.0.0.1:9000/ctp/api/");
        client.get_payment_status("tok", false).await.unwrap();
        assert_eq!(
            client.transport().requests()[0].url,
            "http://127.0.0.1:9000/ctp/api/checkouts/tok/status"
        );
    }

    #[tokio::test]
    async fn test_cancellation_is_distinct_outcome() {
        let client = client(MockTransport::hanging());
        let err = client
            .get_payment_status_until("tok", false, std::future::ready(()))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Cancelled));

        let err = client
            .create_payment_until(&PaymentRequest::new(), false, std::future::ready(()))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Cancelled));
    }

    #[tokio::test]
    async fn test_uncancelled_request_completes() {
        let client = client(MockTransport::json(201, &json!({"id": "abc"})));
        let result = client
            .create_payment_until(&PaymentRequest::new(), false, std::future::pending())
            .await
            .unwrap();
        assert!(result.ok);
    }
}
