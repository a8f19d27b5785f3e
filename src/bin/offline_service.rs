//! Standalone offline asset service for the web-hosted player variant.
//!
//! Installs the current cache generation, prunes stale ones, then serves
//! the interception boundary until interrupted.

use wavecrest_lib::config::OfflineConfig;
use wavecrest_lib::offline::server;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = OfflineConfig::from_env();
    if let Err(err) = server::serve(config).await {
        log::error!("[OfflineService] exiting: {}", err);
        std::process::exit(1);
    }
}
