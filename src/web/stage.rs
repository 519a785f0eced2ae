//! Per-request progress of a feed response.
//!
//! ```text
//! Start -> HeaderSet -> InnerHandlerInvoked -> LanguageResolved
//!       -> ArticlesQueried -> FeedBuilt -> Responded
//! ```
//!
//! Any stage can drop into `Failed`. Out-of-order events do too.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStage {
    Start,
    HeaderSet,
    InnerHandlerInvoked,
    LanguageResolved,
    ArticlesQueried,
    FeedBuilt,
    Responded,
    Failed,
}

#[derive(Debug)]
pub enum FeedEvent<'a> {
    HeaderSet,
    InnerHandlerReturned,
    LanguageResolved { language: &'a str },
    ArticlesQueried { count: usize },
    FeedBuilt,
    Responded,
    Error { reason: &'a str },
}

impl FeedStage {
    pub fn next(self, event: &FeedEvent) -> FeedStage {
        let next = match (self, event) {
            (FeedStage::Start, FeedEvent::HeaderSet) => FeedStage::HeaderSet,
            (FeedStage::HeaderSet, FeedEvent::InnerHandlerReturned) => {
                FeedStage::InnerHandlerInvoked
            }
            (
                FeedStage::InnerHandlerInvoked,
                FeedEvent::LanguageResolved { .. },
            ) => FeedStage::LanguageResolved,
            (
                FeedStage::LanguageResolved,
                FeedEvent::ArticlesQueried { .. },
            ) => FeedStage::ArticlesQueried,
            (FeedStage::ArticlesQueried, FeedEvent::FeedBuilt) => {
                FeedStage::FeedBuilt
            }
            (FeedStage::FeedBuilt, FeedEvent::Responded) => FeedStage::Responded,
            (_, _) => FeedStage::Failed,
        };

        debug!("{:?} --{:?}--> {:?}", self, event, next);
        next
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, FeedStage::Responded | FeedStage::Failed)
    }
}
