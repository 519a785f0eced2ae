use std::future::{ready, Future, Ready};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
};
use chrono::Utc;
use tracing::warn;

use crate::content::{query_articles, ContentStore, Language};
use crate::models::{FeedBuilder, DEFAULT_FEED_LANGUAGE};
use crate::web::errors::FeedError;
use crate::web::stage::{FeedEvent, FeedStage};

pub const RSS_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
pub const FEED_CACHE_CONTROL: &str = "public, max-age=900";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub builder: Arc<FeedBuilder>,
    pub default_locale: Language,
}

/// Turns `inner` into a feed endpoint.
///
/// `inner` runs first, for whatever side effects it has, and answers with
/// the language the feed should be in (`en` when it answers `None`). The
/// response body is always the generated feed, or the JSON error payload of
/// [`FeedError`].
pub fn feed_route<F, Fut>(inner: F) -> MethodRouter<AppState>
where
    F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Option<String>> + Send + 'static,
{
    get(move |State(state): State<AppState>, request: Request| {
        let inner = inner.clone();
        async move { serve_feed(state, request, inner).await }
    })
}

/// An inner handler that always asks for `code`.
pub fn fixed_language(
    code: String,
) -> impl Fn(Request) -> Ready<Option<String>> + Clone + Send + Sync + 'static {
    move |_request: Request| ready(Some(code.clone()))
}

async fn serve_feed<F, Fut>(state: AppState, request: Request, inner: F) -> Response
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Option<String>>,
{
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(RSS_CONTENT_TYPE));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(FEED_CACHE_CONTROL));
    let mut stage = FeedStage::Start.next(&FeedEvent::HeaderSet);

    let response = match render_feed(&state, request, inner, &mut stage).await {
        Ok(xml) => {
            stage = stage.next(&FeedEvent::Responded);
            (headers, xml).into_response()
        }
        Err(err) => {
            let reason = err.to_string();
            warn!("Couldn't generate feed: {}", reason);
            stage = stage.next(&FeedEvent::Error { reason: &reason });
            err.into_response()
        }
    };

    debug_assert!(stage.is_terminal(), "feed response left in {:?}", stage);
    response
}

async fn render_feed<F, Fut>(
    state: &AppState,
    request: Request,
    inner: F,
    stage: &mut FeedStage,
) -> Result<String, FeedError>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Option<String>>,
{
    let route = request.uri().path().to_owned();
    let code = inner(request).await;
    *stage = stage.next(&FeedEvent::InnerHandlerReturned);

    let language: Language = code.as_deref().unwrap_or(DEFAULT_FEED_LANGUAGE).parse()?;
    *stage = stage.next(&FeedEvent::LanguageResolved {
        language: language.as_str(),
    });

    let store = Arc::clone(&state.store);
    let default_locale = state.default_locale.clone();
    let query_language = language.clone();
    let articles = tokio::task::spawn_blocking(move || {
        query_articles(store.as_ref(), &query_language, &default_locale)
    })
    .await??;
    *stage = stage.next(&FeedEvent::ArticlesQueried {
        count: articles.len(),
    });

    let xml = state
        .builder
        .build(&articles, Some(&language), Utc::now())
        .with_self_link(&route)
        .to_rss()?;
    *stage = stage.next(&FeedEvent::FeedBuilt);

    Ok(xml)
}
