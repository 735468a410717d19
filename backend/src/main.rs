//! User registry entry-point: loads settings, builds the failure reporter and
//! serves the REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_failure_reporter, create_server};
use user_registry::inbound::http::health::HealthState;
use user_registry::settings::{ServerSettings, TrackerSettings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let server_settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let tracker_settings =
        TrackerSettings::load_from_iter([OsString::from(env!("CARGO_PKG_NAME"))])
            .map_err(|e| std::io::Error::other(e.to_string()))?;

    let config = ServerConfig::new(server_settings.bind_addr()?)
        .with_failure_reporter(build_failure_reporter(&tracker_settings)?);
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "user registry listening");
    server.await
}
