//! # sitefeed
//!
//! RSS feeds for a multilingual content site. Articles are read from a
//! partitioned content store, newest first, and rendered as RSS 2.0 on every
//! request.

pub mod config;
pub mod content;
pub mod models;
pub mod time;
pub mod tracing;
pub mod web;
