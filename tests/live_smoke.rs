use gdax_api_client::auth::Credentials;
use gdax_api_client::rest::{DEFAULT_PRODUCT, Environment, ExchangeClient};
use tracing_subscriber::EnvFilter;

fn live_tests_enabled() -> bool {
    std::env::var("GDAX_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
#[ignore]
async fn live_sandbox_public_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let client = ExchangeClient::new(Environment::Sandbox)?;

    let time = client.time().await?;
    assert!(time.get("iso").is_some());

    let ticker = client.ticker(DEFAULT_PRODUCT).await?;
    assert!(ticker.get("price").is_some());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_sandbox_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let credentials = match Credentials::try_from_env() {
        Some(creds) => creds,
        None => return Ok(()),
    };
    let client = ExchangeClient::new(Environment::Sandbox)?.with_credentials(credentials);

    let accounts = client.accounts().await?;
    assert!(accounts.is_array());

    let orders = client.orders().await?;
    assert!(orders.is_array());

    Ok(())
}
