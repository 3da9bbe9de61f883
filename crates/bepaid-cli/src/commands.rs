//! Demo Commands

use bepaid_checkout::{CheckoutClient, CheckoutResult, HttpTransport, PaymentRequest};
use clap::{Args, Subcommand};
use rand::Rng;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a checkout from the sample payload
    Create(CreateArgs),

    /// Poll the status of an existing checkout
    Status {
        /// Checkout token returned by `create`
        token: String,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Amount in minor units
    #[arg(long, default_value_t = 100)]
    pub amount: i64,

    /// ISO 4217 currency code
    #[arg(long, default_value = "BYN")]
    pub currency: String,

    /// Send a real transaction instead of a sandbox one
    #[arg(long)]
    pub live: bool,
}

/// Sample payment used by the `create` command
pub fn sample_payment(args: &CreateArgs) -> PaymentRequest {
    let mut rng = rand::thread_rng();
    PaymentRequest::new()
        .test(!args.live)
        .transaction_type("payment")
        .bot_name("BepaidClientSimple")
        .pay_id(rng.gen_range(1_000_000..=9_000_000))
        .tracking_id(rng.gen_range(1_000_000..=9_000_000))
        .user_id(7_777_777)
        .user_name("SevaShpun")
        .amount(args.amount)
        .currency(args.currency.clone())
        .order_description("Оплата")
        .description("Оплата товара")
        .language("ru")
}

/// Run one command, abandoning it if `cancel` fires first
pub async fn run<T, F>(
    client: &CheckoutClient<T>,
    command: Command,
    debug: bool,
    cancel: F,
) -> bepaid_checkout::Result<CheckoutResult>
where
    T: HttpTransport,
    F: std::future::Future<Output = ()>,
{
    match command {
        Command::Create(args) => {
            let payment = sample_payment(&args);
            tracing::info!(
                amount = args.amount,
                currency = %args.currency,
                test = !args.live,
                "Creating checkout"
            );
            client.create_payment_until(&payment, debug, cancel).await
        }
        Command::Status { token } => {
            tracing::info!(%token, "Fetching checkout status");
            client.get_payment_status_until(&token, debug, cancel).await
        }
    }
}
