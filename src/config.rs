//! Runtime settings, read from the environment (and a `.env` file when
//! present).
//!
//! | Variable           | Default                     |
//! |--------------------|-----------------------------|
//! | `BIND_ADDR`        | `127.0.0.1:7878`            |
//! | `CONTENT_DIR`      | `content`                   |
//! | `SITE_URL`         | `https://prompthunt.art`    |
//! | `DEFAULT_LOCALE`   | `zh`                        |
//! | `LOCALES`          | `zh,en`                     |
//! | `FEED_ROUTES`      | `rss.xml=en,rss-cn.xml=zh`  |
//! | `PRERENDER_DIR`    | `.output/public`            |
//! | `FEED_TITLE`       | site default                |
//! | `FEED_DESCRIPTION` | site default                |

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::{Language, LanguageError};
use crate::models::FeedConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    Invalid { var: &'static str, message: String },
    #[error("{var}: {source}")]
    Language {
        var: &'static str,
        #[source]
        source: LanguageError,
    },
}

/// A feed served at `path`, in `language`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRoute {
    pub path: String,
    pub language: Language,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub content_dir: PathBuf,
    pub site_url: String,
    pub default_locale: Language,
    pub locales: Vec<Language>,
    pub routes: Vec<FeedRoute>,
    pub prerender_dir: PathBuf,
    pub feed: FeedConfig,
}

impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        dotenv::dotenv().ok();
        Settings::from_vars(|var| std::env::var(var).ok())
    }

    /// Same as [`Settings::from_env`] with an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str, default: &str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let bind_addr = get("BIND_ADDR", "127.0.0.1:7878")
            .parse::<SocketAddr>()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let default_locale = parse_language("DEFAULT_LOCALE", &get("DEFAULT_LOCALE", "zh"))?;

        let mut locales = get("LOCALES", "zh,en")
            .split(',')
            .filter(|code| !code.trim().is_empty())
            .map(|code| parse_language("LOCALES", code))
            .collect::<Result<Vec<_>, _>>()?;
        if !locales.contains(&default_locale) {
            locales.insert(0, default_locale.clone());
        }

        let routes = parse_routes(&get("FEED_ROUTES", "rss.xml=en,rss-cn.xml=zh"))?;

        let site_url = get("SITE_URL", "https://prompthunt.art");
        let mut feed = FeedConfig::for_site(&site_url);
        if let Some(title) = lookup("FEED_TITLE") {
            feed.title = title;
        }
        if let Some(description) = lookup("FEED_DESCRIPTION") {
            feed.description = description;
        }

        Ok(Settings {
            bind_addr,
            content_dir: PathBuf::from(get("CONTENT_DIR", "content")),
            site_url,
            default_locale,
            locales,
            routes,
            prerender_dir: PathBuf::from(get("PRERENDER_DIR", ".output/public")),
            feed,
        })
    }
}

fn parse_language(var: &'static str, code: &str) -> Result<Language, ConfigError> {
    code.parse()
        .map_err(|source| ConfigError::Language { var, source })
}

/// `rss.xml=en,rss-cn.xml=zh`
fn parse_routes(value: &str) -> Result<Vec<FeedRoute>, ConfigError> {
    value
        .split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| -> Result<FeedRoute, ConfigError> {
            let (path, code) = pair.split_once('=').ok_or_else(|| ConfigError::Invalid {
                var: "FEED_ROUTES",
                message: format!("\"{}\" is not of the form path=language", pair),
            })?;
            let path = path.trim().trim_start_matches('/');
            if path.is_empty() {
                return Err(ConfigError::Invalid {
                    var: "FEED_ROUTES",
                    message: format!("\"{}\" has no path", pair),
                });
            }

            Ok(FeedRoute {
                path: format!("/{}", path),
                language: parse_language("FEED_ROUTES", code)?,
            })
        })
        .collect()
}
