use anyhow::Context;

use potionshop_infra::config::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    potionshop_observability::init();

    let config = ServiceConfig::from_env().context("invalid configuration")?;
    tracing::info!(?config, "starting bottler service");

    let store = potionshop_api::app::services::build_store(&config)
        .await
        .context("failed to open inventory store")?;
    let app = potionshop_api::app::build_app(store, config.api_key.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
