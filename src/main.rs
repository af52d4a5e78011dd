use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paypal_web_checkout::application::form_builder::CheckoutFormBuilder;
use paypal_web_checkout::application::ipn_verifier::IpnVerifier;
use paypal_web_checkout::config::{DEFAULT_BASE_URL, DEFAULT_LOCALE, Settings};
use paypal_web_checkout::domain::checkout::PaypalEnvironment;
use paypal_web_checkout::domain::order::OrderId;
use paypal_web_checkout::domain::ports::{
    EventNotifierRef, HttpVerifierRef, OrderBridgeRef, TransactionLogBox, UrlFactoryRef,
};
use paypal_web_checkout::infrastructure::in_memory::InMemoryTransactionLog;
use paypal_web_checkout::infrastructure::paypal_client::PaypalIpnClient;
use paypal_web_checkout::infrastructure::tracing_notifier::TracingNotifier;
use paypal_web_checkout::infrastructure::url_factory::RouteUrlFactory;
use paypal_web_checkout::interfaces::csv::form_writer::FormWriter;
use paypal_web_checkout::interfaces::csv::order_reader::load_orders;
use paypal_web_checkout::interfaces::http::{AppState, router};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    paypal: PaypalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct PaypalArgs {
    /// Merchant PayPal account, usually its e-mail
    #[arg(long, env = "PAYPAL_BUSINESS")]
    business: String,

    /// PayPal environment payments are sent to
    #[arg(long, env = "PAYPAL_ENVIRONMENT", value_enum, default_value_t = Environment::Sandbox)]
    environment: Environment,

    /// Public base URL of the shop, used for return and notify URLs
    #[arg(long, env = "PAYPAL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Locale shown on PayPal's pages (`lc` field)
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,

    /// Orders CSV file (order_id, amount, currency, discount)
    #[arg(long)]
    orders: PathBuf,

    /// Cart lines CSV file (order_id, name, amount, quantity)
    #[arg(long)]
    cart: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Environment {
    Sandbox,
    Production,
}

impl From<Environment> for PaypalEnvironment {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Sandbox => PaypalEnvironment::Sandbox,
            Environment::Production => PaypalEnvironment::Production,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Serve the checkout and IPN endpoints
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,

        /// Timeout of the IPN validation request to PayPal
        #[arg(long, default_value_t = 10)]
        verify_timeout_secs: u64,

        /// Path to a persistent transaction log (optional). If provided, uses RocksDB.
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// Print the PayPal form of one order as CSV
    Form {
        #[arg(long)]
        order_id: String,
    },
}

impl PaypalArgs {
    fn settings(&self) -> Settings {
        let mut settings = Settings::new(&self.business, self.environment.into());
        settings.base_url = self.base_url.clone();
        settings.locale = self.locale.clone();
        settings
    }
}

fn transaction_log(db_path: Option<PathBuf>) -> Result<TransactionLogBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            use paypal_web_checkout::infrastructure::rocksdb::RocksDbTransactionLog;
            Ok(Box::new(RocksDbTransactionLog::open(path).into_diagnostic()?))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "Persistent transaction log requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
            Ok(Box::new(InMemoryTransactionLog::new()))
        }
        None => Ok(Box::new(InMemoryTransactionLog::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    let mut settings = cli.paypal.settings();

    let orders_file = File::open(&cli.paypal.orders).into_diagnostic()?;
    let cart_file = match &cli.paypal.cart {
        Some(path) => Some(File::open(path).into_diagnostic()?),
        None => None,
    };
    let bridge = load_orders(orders_file, cart_file).await.into_diagnostic()?;
    info!(orders = bridge.len().await, "Loaded orders");

    let orders: OrderBridgeRef = Arc::new(bridge);
    let notifier: EventNotifierRef = Arc::new(TracingNotifier);
    let urls: UrlFactoryRef = Arc::new(
        RouteUrlFactory::new(&settings.base_url, settings.routes.clone()).into_diagnostic()?,
    );
    let form_builder = CheckoutFormBuilder::new(
        orders.clone(),
        notifier.clone(),
        urls,
        settings.form_settings(),
    );

    match cli.command {
        Command::Serve {
            bind,
            verify_timeout_secs,
            db_path,
        } => {
            settings.verify_timeout = Duration::from_secs(verify_timeout_secs);
            let verifier: HttpVerifierRef = Arc::new(
                PaypalIpnClient::new(settings.environment, settings.verify_timeout)
                    .into_diagnostic()?,
            );
            let ipn_verifier =
                IpnVerifier::new(orders, notifier, verifier, transaction_log(db_path)?);

            let state = AppState {
                form_builder: Arc::new(form_builder),
                ipn_verifier: Arc::new(ipn_verifier),
                routes: settings.routes.clone(),
            };

            let listener = tokio::net::TcpListener::bind(bind).await.into_diagnostic()?;
            let address = listener.local_addr().into_diagnostic()?;
            info!(
                %address,
                environment = %settings.environment,
                "Listening"
            );
            axum::serve(listener, router(state)).await.into_diagnostic()?;
        }
        Command::Form { order_id } => {
            let form = form_builder
                .build_form(&OrderId::from(order_id))
                .await
                .into_diagnostic()?;

            let stdout = io::stdout();
            let mut writer = FormWriter::new(stdout.lock());
            writer.write_form(&form).into_diagnostic()?;
        }
    }

    Ok(())
}
