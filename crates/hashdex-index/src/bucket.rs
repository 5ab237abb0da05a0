//! Buckets with chained overflow segments and the static-hash index.

use crate::hash::HashStrategy;
use hashdex_common::{HashdexError, Result};
use hashdex_storage::PageStore;

/// Maps a search key back to the page that holds it.
///
/// Entries point into the page store by number; the index never owns pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEntry {
    pub key: String,
    pub page_number: usize,
}

impl BucketEntry {
    pub fn new(key: impl Into<String>, page_number: usize) -> Self {
        Self {
            key: key.into(),
            page_number,
        }
    }
}

impl std::fmt::Display for BucketEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} -> page {})", self.key, self.page_number)
    }
}

/// A fixed-capacity bucket with a chain of same-capacity overflow segments.
///
/// Segment 0 is the main segment; the rest form the overflow chain in
/// creation order. All segments share the bucket number and capacity, and
/// each enforces the capacity bound independently. The chain is an owned
/// vector rather than a linked structure, so its length is just
/// `segments.len() - 1`.
#[derive(Debug, Clone)]
pub struct Bucket {
    bucket_number: usize,
    capacity: usize,
    segments: Vec<Vec<BucketEntry>>,
}

impl Bucket {
    fn new(bucket_number: usize, capacity: usize) -> Self {
        Self {
            bucket_number,
            capacity,
            segments: vec![Vec::with_capacity(capacity)],
        }
    }

    /// Appends an entry into the first segment with room, growing the chain
    /// when every existing segment is full. Returns the index of the segment
    /// the entry landed in.
    fn push(&mut self, entry: BucketEntry) -> usize {
        if let Some(i) = self.segments.iter().position(|s| s.len() < self.capacity) {
            self.segments[i].push(entry);
            return i;
        }
        let mut segment = Vec::with_capacity(self.capacity);
        segment.push(entry);
        self.segments.push(segment);
        self.segments.len() - 1
    }

    /// Looks up the page number for `key`: the main segment first, then the
    /// overflow chain in order. The first exact match wins, so duplicate
    /// keys resolve to the first-inserted page.
    pub fn find_page(&self, key: &str) -> Option<usize> {
        self.segments
            .iter()
            .flat_map(|segment| segment.iter())
            .find(|entry| entry.key == key)
            .map(|entry| entry.page_number)
    }

    pub fn bucket_number(&self) -> usize {
        self.bucket_number
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the main segment's entries in insertion order.
    pub fn entries(&self) -> &[BucketEntry] {
        &self.segments[0]
    }

    /// Returns every segment, main first, then the overflow chain in order.
    pub fn segments(&self) -> &[Vec<BucketEntry>] {
        &self.segments
    }

    /// Number of entries in the main segment.
    pub fn len(&self) -> usize {
        self.segments[0].len()
    }

    /// Number of entries across the main segment and the whole chain.
    pub fn total_entries(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// True when the main segment is at capacity.
    pub fn is_full(&self) -> bool {
        self.segments[0].len() >= self.capacity
    }

    pub fn has_overflow(&self) -> bool {
        self.segments.len() > 1
    }

    /// Length of the overflow chain beyond the main segment.
    pub fn overflow_segments(&self) -> usize {
        self.segments.len() - 1
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bucket{{bucket_number={}, capacity={}, entries={}",
            self.bucket_number,
            self.capacity,
            self.len()
        )?;
        if self.has_overflow() {
            write!(f, ", overflow_segments={}", self.overflow_segments())?;
        }
        write!(f, "}}")
    }
}

/// A static-hash secondary index over a page store.
///
/// Built once per construct call; the bucket count is fixed at build time
/// and there is no incremental rehashing. The index remembers the strategy
/// it was built with, so lookups stay consistent even if the caller's
/// active strategy changes before the next rebuild.
#[derive(Debug, Clone)]
pub struct BucketIndex {
    buckets: Vec<Bucket>,
    bucket_capacity: usize,
    strategy: HashStrategy,
    collisions: u64,
}

impl BucketIndex {
    /// Builds the index over the current contents of `store`.
    ///
    /// The bucket count is `ceil(record_count / bucket_capacity) + 1`; the
    /// extra bucket buffers against degenerate all-collide distributions,
    /// and an empty store yields exactly one empty bucket. Population
    /// iterates pages in ascending number and records in page order. A
    /// collision is counted exactly when an entry is appended into a main
    /// segment that already holds at least one entry; entries routed to
    /// overflow segments are not counted. Fails when `bucket_capacity` is
    /// zero.
    pub fn build(
        store: &PageStore,
        bucket_capacity: usize,
        strategy: HashStrategy,
    ) -> Result<Self> {
        if bucket_capacity == 0 {
            return Err(HashdexError::InvalidBucketCapacity {
                capacity: bucket_capacity,
            });
        }

        let bucket_count = store.record_count().div_ceil(bucket_capacity) + 1;
        let mut buckets: Vec<Bucket> = (0..bucket_count)
            .map(|i| Bucket::new(i, bucket_capacity))
            .collect();

        let mut collisions = 0u64;
        for (page_number, key) in store.iter_records() {
            let slot = strategy.hash(key, bucket_count);
            let bucket = &mut buckets[slot];
            let segment = bucket.push(BucketEntry::new(key, page_number));
            if segment == 0 && bucket.len() > 1 {
                collisions += 1;
            }
        }

        Ok(Self {
            buckets,
            bucket_capacity,
            strategy,
            collisions,
        })
    }

    /// Looks up the page number for `key` in the bucket it hashes to.
    pub fn find_page(&self, key: &str) -> Option<usize> {
        let slot = self.strategy.hash(key, self.buckets.len());
        self.buckets.get(slot)?.find_page(key)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// The strategy this index was built with.
    pub fn strategy(&self) -> HashStrategy {
        self.strategy
    }

    /// Main-segment collisions counted during construction.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Sum of overflow-chain lengths across all buckets.
    pub fn overflow_segments(&self) -> u64 {
        self.buckets
            .iter()
            .map(|b| b.overflow_segments() as u64)
            .sum()
    }
}
