use std::{future::Future, net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use clampsite_core_contact_contracts::ContactService;
use clampsite_core_search_contracts::SearchService;
use clampsite_di::Build;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact, Search> {
    contact: Contact,
    search: Search,
}

impl<Contact, Search> RestServer<Contact, Search>
where
    Contact: ContactService,
    Search: SearchService,
{
    /// Serve until the process receives Ctrl+C.
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Listening on http://{}", listener.local_addr()?);

        self.serve_on(listener, shutdown_signal()).await
    }

    pub async fn serve_on(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("Failed to run HTTP server")
    }

    fn router(self) -> Router<()> {
        let contact = Arc::new(self.contact);

        let router = Router::new()
            .merge(routes::contact::router(Arc::clone(&contact)))
            .merge(routes::health::router(contact))
            .merge(routes::search::router(Arc::new(self.search)));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral port and return its base url.
    pub(crate) async fn spawn(router: Router<()>) -> String {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}")
    }
}
