//! # Articles and feeds
//!
//! The [`Article`] shape read out of the content store, and the RSS
//! document built from a list of them.

mod article;
mod feed;
mod feed_template;

pub use article::{Article, Author};
pub use feed::{
    DocumentLink, FeedAuthor, FeedBuilder, FeedConfig, FeedDocument, FeedItem, FeedLink,
    DEFAULT_FEED_LANGUAGE,
};
pub use feed_template::RssTemplate;
