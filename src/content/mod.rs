//! # Content store and queries
//!
//! Articles live in partitions of a [`ContentStore`], one partition per
//! language. The store is read-only from here; every query goes back to it.

mod fs;
mod language;
mod memory;
mod query;

pub use fs::FsStore;
pub use language::{Language, LanguageError, Partition};
pub use memory::MemoryStore;
pub use query::{query_articles, QueryError, ARTICLES, PUBLISHED_AT};

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::time::parse_published_at;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown partition \"{0}\"")]
    UnknownPartition(String),
    #[error("couldn't read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("bad front matter in {path}: {message}")]
    FrontMatter { path: String, message: String },
}

/// A content item as the store hands it out, before conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawItem(pub Map<String, Value>);

impl RawItem {
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Sets `field` only when the item doesn't carry it already.
    pub fn set_default(&mut self, field: &str, value: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| Value::String(value.into()));
    }

    fn date_of(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get_str(field).and_then(parse_published_at)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Value> for RawItem {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawItem(map),
            _ => RawItem::default(),
        }
    }
}

/// Read access to partitioned content.
pub trait ContentStore: Send + Sync {
    /// Returns every item of `partition`, ordered by the date held in
    /// `sort_field`.
    fn fetch_all(
        &self,
        partition: &str,
        sort_field: &str,
        descending: bool,
    ) -> Result<Vec<RawItem>, StoreError>;
}

/// Stable sort on a date field. Items without a parsable date go last in
/// both directions.
pub fn sort_by_date(items: &mut [RawItem], field: &str, descending: bool) {
    items.sort_by(|a, b| compare_dates(a, b, field, descending));
}

fn compare_dates(
    a: &RawItem,
    b: &RawItem,
    field: &str,
    descending: bool,
) -> Ordering {
    match (a.date_of(field), b.date_of(field)) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
