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

use crate::api::{AppState, MgmtState};
use crate::config::Config;
use crate::services::health_service::HealthService;
use crate::services::user_service::UserService;
use crate::storage::UserStore;
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

/// Fully wired services, ready to be mounted on routers.
#[derive(Debug)]
pub struct App {
    pub user_service: UserService,
    pub health_service: HealthService,
}

impl App {
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState { user_service: self.user_service.clone() }
    }

    #[must_use]
    pub fn mgmt_state(&self) -> MgmtState {
        MgmtState { health_service: self.health_service.clone() }
    }
}

#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    store: Option<Arc<dyn UserStore>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, store: None }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Wires the services around the configured store.
    ///
    /// # Errors
    /// Returns an error if no store was supplied.
    pub fn build(self) -> anyhow::Result<App> {
        let store = self.store.ok_or_else(|| anyhow::anyhow!("a user store is required"))?;
        let request_timeout = self.config.database.request_timeout();

        Ok(App {
            user_service: UserService::new(Arc::clone(&store), request_timeout),
            health_service: HealthService::new(store, request_timeout),
        })
    }
}

/// Verifies the store answers a ping within `timeout`, as required before serving.
///
/// # Errors
/// Returns an error describing why the store could not be reached.
pub async fn check_store_at_startup(store: Arc<dyn UserStore>, timeout: std::time::Duration) -> anyhow::Result<()> {
    HealthService::new(store, timeout).check_db().await.map_err(anyhow::Error::msg)
}

/// Routes panics through `tracing` so they land in the structured log stream.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        tracing::error!(panic = %info, location = %location, "Panic occurred");
    }));
}
