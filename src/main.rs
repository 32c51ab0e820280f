use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tripmate::config::Config;
use tripmate::engine::Engine;
use tripmate::error::Error;
use tripmate::external::google_maps::GoogleMaps;
use tripmate::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tripmate=info")),
        )
        .init();

    let config = Config::from_env()?;
    let provider = GoogleMaps::new(&config);
    let engine = Engine::new(provider, config.planner.clone());

    serve(engine, config.bind_addr).await;

    Ok(())
}
