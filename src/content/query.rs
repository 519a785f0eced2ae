use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use super::{ContentStore, Language, Partition, StoreError};
use crate::models::Article;

pub const ARTICLES: &str = "articles";
pub const PUBLISHED_AT: &str = "publishedAt";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Returns the articles written in `language`, newest first.
///
/// Items the store hands back that can't be read as an [`Article`] are
/// logged and left out, and so is every item repeating the slug of a newer
/// one.
pub fn query_articles(
    store: &dyn ContentStore,
    language: &Language,
    default_locale: &Language,
) -> Result<Vec<Article>, QueryError> {
    let partition = Partition::for_language(ARTICLES, language, default_locale);
    let items = store.fetch_all(partition.key(), PUBLISHED_AT, true)?;
    let total = items.len();

    let mut seen = HashSet::new();
    let articles: Vec<Article> = items
        .into_iter()
        .filter_map(|item| {
            let slug = item.get_str("slug").unwrap_or("?").to_owned();
            match Article::try_from(item) {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!("Skipping \"{}\" in {}: {}", slug, partition, e);
                    None
                }
            }
        })
        .filter(|article| {
            let first = seen.insert(article.slug.clone());
            if !first {
                warn!(
                    "Skipping \"{}\" in {}: slug already used by a newer article",
                    article.slug, partition
                );
            }
            first
        })
        .collect();

    debug!(
        "Queried {} of {} items from partition \"{}\"",
        articles.len(),
        total,
        partition
    );
    Ok(articles)
}
