use serde::{Deserialize, Serialize};

use crate::content::RawItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub avatar: String,
}

/// One entry of an `articles` partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Canonical route of the article, e.g. `/en/articles/hello`.
    pub path: String,
    /// Kept as written; parsed when the feed is built.
    #[serde(default)]
    pub published_at: String,
    pub slug: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub author: Option<Author>,
}

impl TryFrom<RawItem> for Article {
    type Error = serde_json::Error;

    fn try_from(item: RawItem) -> Result<Self, Self::Error> {
        serde_json::from_value(item.into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_a_full_item() {
        let item = RawItem::from(json!({
            "title": "Hello",
            "description": "First post",
            "path": "/articles/hello",
            "publishedAt": "2024-01-01",
            "slug": "hello",
            "url": "https://example.com/hello",
            "cover": "/img/hello.png",
            "author": { "name": "Ada", "url": "https://ada.dev", "avatar": "/ada.png" },
            "body": { "ignored": true },
        }));

        let article = Article::try_from(item).unwrap();
        assert_eq!(article.published_at, "2024-01-01");
        assert_eq!(article.author.unwrap().name, "Ada");
    }

    #[test]
    fn optional_fields_default() {
        let item = RawItem::from(json!({
            "title": "Bare",
            "path": "/articles/bare",
            "slug": "bare",
        }));

        let article = Article::try_from(item).unwrap();
        assert_eq!(article.description, "");
        assert_eq!(article.published_at, "");
        assert!(article.author.is_none());
    }

    #[test]
    fn missing_title_is_rejected() {
        let item = RawItem::from(json!({ "path": "/x", "slug": "x" }));

        assert!(Article::try_from(item).is_err());
    }
}
