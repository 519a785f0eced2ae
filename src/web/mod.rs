//! # Web application module
//!
//! Serves the RSS feeds. Every route is a [`feed_route`] around a small
//! inner handler that picks the feed language.

mod app;
mod errors;
mod handlers;
pub mod stage;

pub use app::build_app;
pub use errors::FeedError;
pub use handlers::{
    feed_route, fixed_language, AppState, FEED_CACHE_CONTROL, RSS_CONTENT_TYPE,
};
