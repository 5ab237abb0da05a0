//! Statistics accumulated by index construction and queries.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters and timers describing the cost of index construction and the
/// two lookup paths.
///
/// Construction counters are recomputed on every index build; the per-query
/// fields (accesses and timers) hold only the most recent query's cost and
/// are overwritten on each search or scan. Every field is an independent
/// atomic, so concurrent readers can record their query cost without a lock;
/// no cross-field consistency is promised beyond per-field atomic replace.
#[derive(Debug, Default)]
pub struct IndexStatistics {
    total_records: AtomicU64,
    total_pages: AtomicU64,
    total_buckets: AtomicU64,
    bucket_capacity: AtomicU64,
    collisions: AtomicU64,
    overflows: AtomicU64,
    search_accesses: AtomicU64,
    table_scan_accesses: AtomicU64,
    search_time_nanos: AtomicU64,
    table_scan_time_nanos: AtomicU64,
}

impl IndexStatistics {
    /// Creates a zeroed statistics block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every counter and timer to zero.
    pub fn reset(&self) {
        self.total_records.store(0, Ordering::Relaxed);
        self.total_pages.store(0, Ordering::Relaxed);
        self.total_buckets.store(0, Ordering::Relaxed);
        self.bucket_capacity.store(0, Ordering::Relaxed);
        self.collisions.store(0, Ordering::Relaxed);
        self.overflows.store(0, Ordering::Relaxed);
        self.search_accesses.store(0, Ordering::Relaxed);
        self.table_scan_accesses.store(0, Ordering::Relaxed);
        self.search_time_nanos.store(0, Ordering::Relaxed);
        self.table_scan_time_nanos.store(0, Ordering::Relaxed);
    }

    /// Records the outcome of loading a record store.
    pub fn record_load(&self, total_records: u64, total_pages: u64) {
        self.total_records.store(total_records, Ordering::Relaxed);
        self.total_pages.store(total_pages, Ordering::Relaxed);
    }

    /// Records the outcome of constructing a bucket index.
    pub fn record_construction(
        &self,
        total_buckets: u64,
        bucket_capacity: u64,
        collisions: u64,
        overflows: u64,
    ) {
        self.total_buckets.store(total_buckets, Ordering::Relaxed);
        self.bucket_capacity.store(bucket_capacity, Ordering::Relaxed);
        self.collisions.store(collisions, Ordering::Relaxed);
        self.overflows.store(overflows, Ordering::Relaxed);
    }

    /// Records the cost of the most recent indexed search.
    pub fn record_search(&self, accesses: u64, elapsed_nanos: u64) {
        self.search_accesses.store(accesses, Ordering::Relaxed);
        self.search_time_nanos.store(elapsed_nanos, Ordering::Relaxed);
    }

    /// Records the cost of the most recent table scan.
    pub fn record_table_scan(&self, accesses: u64, elapsed_nanos: u64) {
        self.table_scan_accesses.store(accesses, Ordering::Relaxed);
        self.table_scan_time_nanos.store(elapsed_nanos, Ordering::Relaxed);
    }

    pub fn total_records(&self) -> u64 {
        self.total_records.load(Ordering::Relaxed)
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages.load(Ordering::Relaxed)
    }

    pub fn total_buckets(&self) -> u64 {
        self.total_buckets.load(Ordering::Relaxed)
    }

    pub fn collisions(&self) -> u64 {
        self.collisions.load(Ordering::Relaxed)
    }

    pub fn overflows(&self) -> u64 {
        self.overflows.load(Ordering::Relaxed)
    }

    /// Takes a detached copy of every field.
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total_records: self.total_records.load(Ordering::Relaxed),
            total_pages: self.total_pages.load(Ordering::Relaxed),
            total_buckets: self.total_buckets.load(Ordering::Relaxed),
            bucket_capacity: self.bucket_capacity.load(Ordering::Relaxed),
            collisions: self.collisions.load(Ordering::Relaxed),
            overflows: self.overflows.load(Ordering::Relaxed),
            search_accesses: self.search_accesses.load(Ordering::Relaxed),
            table_scan_accesses: self.table_scan_accesses.load(Ordering::Relaxed),
            search_time_nanos: self.search_time_nanos.load(Ordering::Relaxed),
            table_scan_time_nanos: self.table_scan_time_nanos.load(Ordering::Relaxed),
        }
    }
}

/// Plain-value copy of [`IndexStatistics`] for reporting and serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_records: u64,
    pub total_pages: u64,
    pub total_buckets: u64,
    pub bucket_capacity: u64,
    pub collisions: u64,
    pub overflows: u64,
    pub search_accesses: u64,
    pub table_scan_accesses: u64,
    pub search_time_nanos: u64,
    pub table_scan_time_nanos: u64,
}

impl StatisticsSnapshot {
    /// Collisions as a percentage of total records (0 when no records).
    pub fn collision_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        self.collisions as f64 * 100.0 / self.total_records as f64
    }

    /// Overflow segments as a percentage of total buckets (0 when no buckets).
    pub fn overflow_rate(&self) -> f64 {
        if self.total_buckets == 0 {
            return 0.0;
        }
        self.overflows as f64 * 100.0 / self.total_buckets as f64
    }

    /// Table-scan time minus indexed-search time, in milliseconds.
    pub fn time_difference_millis(&self) -> f64 {
        (self.table_scan_time_nanos as f64 - self.search_time_nanos as f64) / 1_000_000.0
    }
}

impl std::fmt::Display for StatisticsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "IndexStatistics {{")?;
        writeln!(f, "    Total Records: {}", self.total_records)?;
        writeln!(f, "    Total Pages: {}", self.total_pages)?;
        writeln!(f, "    Total Buckets: {}", self.total_buckets)?;
        writeln!(f, "    Bucket Capacity: {}", self.bucket_capacity)?;
        writeln!(
            f,
            "    Collisions: {} ({:.2}%)",
            self.collisions,
            self.collision_rate()
        )?;
        writeln!(
            f,
            "    Overflows: {} ({:.2}%)",
            self.overflows,
            self.overflow_rate()
        )?;
        writeln!(f, "    Search Accesses: {}", self.search_accesses)?;
        writeln!(f, "    Table Scan Accesses: {}", self.table_scan_accesses)?;
        writeln!(
            f,
            "    Search Time: {:.2} ms",
            self.search_time_nanos as f64 / 1_000_000.0
        )?;
        writeln!(
            f,
            "    Table Scan Time: {:.2} ms",
            self.table_scan_time_nanos as f64 / 1_000_000.0
        )?;
        writeln!(
            f,
            "    Time Difference: {:.2} ms",
            self.time_difference_millis()
        )?;
        write!(f, "}}")
    }
}
