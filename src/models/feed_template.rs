use askama_axum::Template;

use crate::models::FeedDocument;

#[derive(Template)]
#[template(path = "rss.xml")]
pub struct RssTemplate<'a> {
    pub feed: &'a FeedDocument,
}
