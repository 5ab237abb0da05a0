//! Record storage for Hashdex.
//!
//! This crate provides:
//! - Fixed-capacity pages and the page store built from a record sequence
//! - The line-delimited record source reader

pub mod page;
pub mod source;

pub use page::{Page, PageStore};
pub use source::{load_records, read_records};
