use std::sync::Arc;

use reqwest::{redirect, ClientBuilder};
use site_core::{Credentials, NotionProxy, SiteConfig};
use site_server::{router, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SiteConfig::load();
    let credentials = Credentials::from_env();
    if credentials.api_key().is_none() {
        warn!("NOTION_API_KEY is not set; every request will fail until it is configured");
    }

    let client = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent(config.server.user_agent.clone())
        .build()?;

    let proxy = NotionProxy::new(client, config.notion.clone(), credentials);
    let app = router(AppState {
        proxy: Arc::new(proxy),
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!(address = %config.server.bind_address, "site proxy listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
