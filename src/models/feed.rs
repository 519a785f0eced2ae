//! # Feed documents
//!
//! A [`FeedDocument`] is rebuilt from the current articles on every request
//! and thrown away once serialized. The site-level values that go into it
//! live in a [`FeedConfig`] handed to the [`FeedBuilder`].

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::content::Language;
use crate::models::{Article, RssTemplate};
use crate::time::{copyright_notice, parse_published_at, to_rfc2822};

pub const DEFAULT_FEED_LANGUAGE: &str = "en";

const DEFAULT_CATEGORIES: [&str; 12] = [
    "AI",
    "AI 科学",
    "AI 项目",
    "AI 产品",
    "AI 开源",
    "AI 音乐",
    "AI 艺术",
    "AI 人工智能",
    "AI 机器人",
    "AI 智能",
    "AI 提示词",
    "AI 语言",
];

#[derive(Debug, Clone, PartialEq)]
pub struct FeedAuthor {
    pub name: String,
    pub link: String,
}

/// An alternate feed of the same site, e.g. `rss-cn`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedLink {
    pub name: String,
    pub href: String,
}

/// A [`FeedLink`] as rendered in a document: `self` for the feed being
/// served, `alternate` for the others.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLink {
    pub name: String,
    pub href: String,
    pub rel: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub title: String,
    pub description: String,
    pub id: String,
    pub link: String,
    pub image: String,
    pub favicon: String,
    pub copyright_holder: String,
    pub copyright_start_year: i32,
    pub feed_links: Vec<FeedLink>,
    /// Credited on items whose article has no author.
    pub author: FeedAuthor,
    pub categories: Vec<String>,
}

impl FeedConfig {
    /// The PROMPTHUNT.ART feed, rooted at `site_url`.
    pub fn for_site(site_url: &str) -> Self {
        let site_url = site_url.trim_end_matches('/');

        FeedConfig {
            title: "硅人语言艺术（PROMPTHUNT.ART）".to_owned(),
            description: concat!(
                "聚焦全球 AI 提示词（prompt），帮助大家高效用好 AI。",
                "关注硅人语言艺术，硅人世界触手可得！"
            )
            .to_owned(),
            id: format!("{}/articles", site_url),
            link: format!("{}/articles", site_url),
            image: format!("{}/apple-touch-icon.png", site_url),
            favicon: format!("{}/favicon.ico", site_url),
            copyright_holder: "PROMPTHUNT.ART".to_owned(),
            copyright_start_year: 2025,
            feed_links: vec![
                FeedLink {
                    name: "rss".to_owned(),
                    href: format!("{}/rss.xml", site_url),
                },
                FeedLink {
                    name: "rss-cn".to_owned(),
                    href: format!("{}/rss-cn.xml", site_url),
                },
            ],
            author: FeedAuthor {
                name: "硅人8（PROMPTHUNT）".to_owned(),
                link: site_url.to_owned(),
            },
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig::for_site("https://prompthunt.art")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub id: String,
    pub link: String,
    pub description: String,
    pub author: FeedAuthor,
    pub published_at: DateTime<Utc>,
    pub pub_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    pub id: String,
    pub link: String,
    pub language: String,
    pub image: String,
    pub favicon: String,
    pub copyright: String,
    pub feed_links: Vec<DocumentLink>,
    pub author: FeedAuthor,
    pub categories: Vec<String>,
    pub last_build_date: String,
    pub items: Vec<FeedItem>,
}

impl FeedDocument {
    /// Serializes the document as RSS 2.0.
    pub fn to_rss(&self) -> Result<String, askama::Error> {
        use askama_axum::Template;

        RssTemplate { feed: self }.render()
    }

    /// Marks the configured link served at `route` (`/rss-cn.xml`) as the
    /// document's own.
    pub fn with_self_link(mut self, route: &str) -> Self {
        for link in &mut self.feed_links {
            link.rel = if href_path(&link.href) == route {
                "self"
            } else {
                "alternate"
            };
        }
        self
    }
}

/// `https://site/rss.xml` -> `/rss.xml`
fn href_path(href: &str) -> &str {
    match href.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => href,
    }
}

#[derive(Debug, Clone)]
pub struct FeedBuilder {
    config: FeedConfig,
}

impl FeedBuilder {
    pub fn new(config: FeedConfig) -> Self {
        FeedBuilder { config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Builds the feed for `articles`, keeping their order.
    ///
    /// `language` only labels the feed and falls back to `en`. An article
    /// whose `publishedAt` can't be parsed is dated at the Unix epoch.
    pub fn build(
        &self,
        articles: &[Article],
        language: Option<&Language>,
        now: DateTime<Utc>,
    ) -> FeedDocument {
        let config = &self.config;

        let items = articles.iter().map(|a| self.item_for(a)).collect();

        FeedDocument {
            title: config.title.clone(),
            description: config.description.clone(),
            id: config.id.clone(),
            link: config.link.clone(),
            language: language
                .map(|l| l.as_str())
                .unwrap_or(DEFAULT_FEED_LANGUAGE)
                .to_owned(),
            image: config.image.clone(),
            favicon: config.favicon.clone(),
            copyright: copyright_notice(
                config.copyright_start_year,
                &now,
                &config.copyright_holder,
            ),
            feed_links: config
                .feed_links
                .iter()
                .map(|link| DocumentLink {
                    name: link.name.clone(),
                    href: link.href.clone(),
                    rel: "alternate",
                })
                .collect(),
            author: config.author.clone(),
            categories: config.categories.clone(),
            last_build_date: to_rfc2822(&now),
            items,
        }
    }

    fn item_for(&self, article: &Article) -> FeedItem {
        let published_at = parse_published_at(&article.published_at)
            .unwrap_or_else(|| {
                warn!(
                    "Article \"{}\" has an unreadable publishedAt \"{}\", using the epoch",
                    article.slug, article.published_at
                );
                DateTime::<Utc>::UNIX_EPOCH
            });

        let author = match &article.author {
            Some(author) => FeedAuthor {
                name: author.name.clone(),
                link: author.url.clone(),
            },
            None => self.config.author.clone(),
        };

        FeedItem {
            title: article.title.clone(),
            id: article.slug.clone(),
            link: article.path.clone(),
            description: article.description.clone(),
            author,
            pub_date: to_rfc2822(&published_at),
            published_at,
        }
    }
}
