#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::Instrument;
use users_server::config::Config;
use users_server::storage::UserStore;
use users_server::storage::mongo::MongoUserStore;
use users_server::{AppBuilder, api, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    telemetry::init_telemetry(&config.telemetry)?;

    users_server::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app) = async {
        // Phase 1: Store connectivity. Nothing is served if this fails.
        let store: Arc<dyn UserStore> = match MongoUserStore::connect(&config.database).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(error = %e, "Failed to set up database client");
                return Err(e.into());
            }
        };
        if let Err(e) = users_server::check_store_at_startup(Arc::clone(&store), config.database.connect_timeout()).await
        {
            tracing::error!(error = %e, "Database unreachable at startup");
            return Err(e);
        }
        tracing::info!(database = %config.database.name, collection = %config.database.collection, "Connected to database");
        tracing::warn!("User passwords are stored and returned in plaintext");

        // Phase 2: Component wiring
        let app = AppBuilder::new(config.clone()).with_store(store).build()?;
        let app_router = api::app_router(app.app_state());
        let mgmt_app = api::mgmt_router(app.mgmt_state());

        // Phase 3: Listeners
        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        Ok::<(tokio::net::TcpListener, tokio::net::TcpListener, axum::Router, axum::Router), anyhow::Error>((
            api_listener,
            mgmt_listener,
            app_router,
            mgmt_app,
        ))
    }
    .instrument(boot_span)
    .await?;

    let api_server = axum::serve(api_listener, app_router.into_make_service_with_connect_info::<SocketAddr>());
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app.into_make_service_with_connect_info::<SocketAddr>());

    if let Err(e) = tokio::try_join!(api_server, mgmt_server) {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
