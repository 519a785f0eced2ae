use std::error::Error;
use std::sync::Arc;

use sitefeed::config::Settings;
use sitefeed::content::{FsStore, ARTICLES};
use sitefeed::tracing::setup_tracing;
use sitefeed::web::build_app;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing()?;

    let settings = Settings::from_env()?;
    let store = Arc::new(FsStore::new(
        &settings.content_dir,
        &[ARTICLES],
        &settings.locales,
        &settings.default_locale,
    ));

    let app = build_app(&settings, store);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    info!(
        "Serving feeds from {:?} on http://{}",
        settings.content_dir, settings.bind_addr
    );

    tokio::select! {
        res = axum::serve(listener, app) => {
            if let Err(e) = res {
                error!("HTTP service failed: {}", e);
            } else {
                error!("HTTP service exited prematurely");
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
