use clampsite_config::Config;
use clampsite_di::Provides;
use tracing::{info, warn};

use crate::environment::{types::RestServer, Provider};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let mut provider = Provider::new(&config)?;

    match provider.contact_config_error() {
        None => info!("Contact relay is configured"),
        Some(err) => warn!("Contact relay is disabled: {err}"),
    }

    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
