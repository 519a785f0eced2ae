//! Writes every configured feed to `PRERENDER_DIR`, for static hosting.
//!
//! Unlike the server, any failure here aborts the run.

use std::error::Error;
use std::fs;

use chrono::Utc;
use sitefeed::config::Settings;
use sitefeed::content::{query_articles, FsStore, ARTICLES};
use sitefeed::models::FeedBuilder;
use sitefeed::tracing::setup_tracing;
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing()?;

    let settings = Settings::from_env()?;
    let store = FsStore::new(
        &settings.content_dir,
        &[ARTICLES],
        &settings.locales,
        &settings.default_locale,
    );
    let builder = FeedBuilder::new(settings.feed.clone());
    let now = Utc::now();

    for route in &settings.routes {
        let articles =
            query_articles(&store, &route.language, &settings.default_locale)?;
        let xml = builder
            .build(&articles, Some(&route.language), now)
            .with_self_link(&route.path)
            .to_rss()?;

        let target = settings
            .prerender_dir
            .join(route.path.trim_start_matches('/'));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, xml)?;

        info!("Wrote {} ({} items)", target.display(), articles.len());
    }

    Ok(())
}
