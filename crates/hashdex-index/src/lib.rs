//! Static-hash secondary index for Hashdex.
//!
//! This crate provides:
//! - The closed set of pluggable hash strategies
//! - Buckets with chained fixed-capacity overflow segments
//! - The bucket index built once over a page store

pub mod bucket;
pub mod hash;

pub use bucket::{Bucket, BucketEntry, BucketIndex};
pub use hash::HashStrategy;
