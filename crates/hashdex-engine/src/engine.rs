//! The simulation engine orchestrating storage, index, and statistics.

use hashdex_common::{HashdexError, IndexStatistics, Result, SimulatorConfig, StatisticsSnapshot};
use hashdex_index::{Bucket, BucketIndex, HashStrategy};
use hashdex_storage::page::{Page, PageStore};
use hashdex_storage::source;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::time::Instant;

/// The engine's logical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No record store has been loaded.
    Empty,
    /// A record store exists but no index has been constructed over it.
    Loaded,
    /// Both a record store and a bucket index exist.
    Indexed,
}

/// Outcome of a single indexed search or table scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub found: bool,
    /// Page holding the key, or -1 when not found.
    pub page_number: i64,
    /// Accesses charged to this query: buckets and pages for an indexed
    /// search, pages visited for a table scan.
    pub access_count: u64,
    pub search_key: String,
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.found {
            write!(
                f,
                "Found '{}' on page {} (accessed {} pages)",
                self.search_key, self.page_number, self.access_count
            )
        } else {
            write!(
                f,
                "Key '{}' not found (accessed {} pages)",
                self.search_key, self.access_count
            )
        }
    }
}

/// Orchestrates a page store, an optional bucket index, and the statistics
/// that make the two lookup paths comparable.
///
/// All mutable state lives in this owned struct, so independent simulations
/// can coexist. Rebuilds (`load`, `construct`) swap whole structures behind
/// write locks; queries are shared readers that only touch the atomic
/// statistics fields, so an engine wrapped in `Arc` supports concurrent
/// queries from multiple threads.
///
/// Lock ordering is pages before index everywhere both are taken.
pub struct Engine {
    config: SimulatorConfig,
    strategy: RwLock<HashStrategy>,
    pages: RwLock<Option<PageStore>>,
    index: RwLock<Option<BucketIndex>>,
    stats: IndexStatistics,
}

impl Engine {
    /// Creates an engine from a configuration.
    ///
    /// The configured strategy name is parsed up front and unknown names
    /// are rejected.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        let strategy: HashStrategy = config.hash_strategy.parse()?;
        Ok(Self {
            config,
            strategy: RwLock::new(strategy),
            pages: RwLock::new(None),
            index: RwLock::new(None),
            stats: IndexStatistics::new(),
        })
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Returns the engine's logical state.
    pub fn state(&self) -> EngineState {
        let pages = self.pages.read();
        let index = self.index.read();
        if index.is_some() {
            EngineState::Indexed
        } else if pages.is_some() {
            EngineState::Loaded
        } else {
            EngineState::Empty
        }
    }

    /// Loads the configured word file into a fresh page store.
    ///
    /// Resets all statistics, records the new totals, and discards any
    /// existing index. On failure (unreadable source or zero page size) the
    /// previous store, index, and statistics are left untouched: the new
    /// store is fully built before anything is swapped in.
    pub fn load(&self, page_size: usize) -> Result<()> {
        let records = source::load_records(&self.config.words_path)?;
        self.install(records, page_size)
    }

    /// Loads records from any line-delimited stream instead of the
    /// configured word file.
    pub fn load_from_reader<R: BufRead>(&self, reader: R, page_size: usize) -> Result<()> {
        let records = source::read_records(reader)?;
        self.install(records, page_size)
    }

    /// Loads the configured word file with the configured page size.
    pub fn load_default(&self) -> Result<()> {
        self.load(self.config.page_size)
    }

    fn install(&self, records: Vec<String>, page_size: usize) -> Result<()> {
        let store = PageStore::build(records, page_size)?;

        let mut pages = self.pages.write();
        let mut index = self.index.write();
        self.stats.reset();
        self.stats
            .record_load(store.record_count() as u64, store.page_count() as u64);
        tracing::info!(
            total_records = store.record_count(),
            total_pages = store.page_count(),
            page_size,
            "record store loaded"
        );
        *index = None;
        *pages = Some(store);
        Ok(())
    }

    /// Replaces the active hash strategy.
    ///
    /// An already-built index keeps the strategy it was built with; the new
    /// strategy takes effect on the next [`Engine::construct`].
    pub fn set_hash_strategy(&self, strategy: HashStrategy) {
        tracing::debug!(strategy = strategy.name(), "hash strategy replaced");
        *self.strategy.write() = strategy;
    }

    /// Replaces the active hash strategy by name, failing closed on unknown
    /// names.
    pub fn set_hash_strategy_by_name(&self, name: &str) -> Result<()> {
        self.set_hash_strategy(name.parse()?);
        Ok(())
    }

    /// Returns the active hash strategy.
    pub fn hash_strategy(&self) -> HashStrategy {
        *self.strategy.read()
    }

    /// Builds a bucket index over the current page store, replacing any
    /// previous index, and updates the construction statistics.
    pub fn construct(&self, bucket_capacity: usize) -> Result<()> {
        let pages = self.pages.read();
        let store = pages.as_ref().ok_or(HashdexError::NotLoaded)?;
        let strategy = *self.strategy.read();

        let built = BucketIndex::build(store, bucket_capacity, strategy)?;
        self.stats.record_construction(
            built.bucket_count() as u64,
            bucket_capacity as u64,
            built.collisions(),
            built.overflow_segments(),
        );
        tracing::info!(
            total_buckets = built.bucket_count(),
            collisions = built.collisions(),
            overflow_segments = built.overflow_segments(),
            strategy = strategy.name(),
            "bucket index constructed"
        );
        *self.index.write() = Some(built);
        Ok(())
    }

    /// Builds the index with the configured bucket capacity.
    pub fn construct_default(&self) -> Result<()> {
        self.construct(self.config.bucket_capacity)
    }

    /// Looks up `key` through the bucket index.
    ///
    /// Charges one bucket access regardless of overflow-chain depth. When
    /// the index yields a page, one page access is charged and the key's
    /// presence is verified against that page's records. Stores the access
    /// count and elapsed time into the statistics, overwriting the previous
    /// search's values.
    pub fn search_with_index(&self, key: &str) -> Result<SearchResult> {
        let start = Instant::now();
        let pages = self.pages.read();
        let index = self.index.read();
        let index = index.as_ref().ok_or(HashdexError::NotIndexed)?;
        let store = pages.as_ref().ok_or(HashdexError::NotLoaded)?;

        let mut access_count = 1u64; // the bucket access
        let result = match index.find_page(key) {
            Some(page_number) => {
                access_count += 1; // the page access
                let found = store.get(page_number).is_some_and(|p| p.contains(key));
                SearchResult {
                    found,
                    page_number: page_number as i64,
                    access_count,
                    search_key: key.to_string(),
                }
            }
            None => SearchResult {
                found: false,
                page_number: -1,
                access_count,
                search_key: key.to_string(),
            },
        };

        self.stats
            .record_search(access_count, start.elapsed().as_nanos() as u64);
        Ok(result)
    }

    /// Looks up `key` by scanning pages in ascending order.
    ///
    /// Charges one access per page visited and returns at the first page
    /// containing the key; a full miss has visited every page. Stores the
    /// access count and elapsed time into the statistics, overwriting the
    /// previous scan's values.
    pub fn table_scan(&self, key: &str) -> Result<SearchResult> {
        let start = Instant::now();
        let pages = self.pages.read();
        let store = pages.as_ref().ok_or(HashdexError::NotLoaded)?;

        let mut access_count = 0u64;
        let mut found_page = None;
        for page in store.pages() {
            access_count += 1;
            if page.contains(key) {
                found_page = Some(page.page_number());
                break;
            }
        }

        self.stats
            .record_table_scan(access_count, start.elapsed().as_nanos() as u64);
        Ok(match found_page {
            Some(page_number) => SearchResult {
                found: true,
                page_number: page_number as i64,
                access_count,
                search_key: key.to_string(),
            },
            None => SearchResult {
                found: false,
                page_number: -1,
                access_count,
                search_key: key.to_string(),
            },
        })
    }

    /// Takes a detached copy of the statistics.
    pub fn statistics(&self) -> StatisticsSnapshot {
        self.stats.snapshot()
    }

    /// Returns detached copies of all pages for presentation layers.
    pub fn pages(&self) -> Vec<Page> {
        self.pages
            .read()
            .as_ref()
            .map(|store| store.pages().to_vec())
            .unwrap_or_default()
    }

    /// Returns detached copies of all buckets for presentation layers.
    pub fn buckets(&self) -> Vec<Bucket> {
        self.index
            .read()
            .as_ref()
            .map(|index| index.buckets().to_vec())
            .unwrap_or_default()
    }

    pub fn first_page(&self) -> Option<Page> {
        self.pages.read().as_ref().and_then(|s| s.first().cloned())
    }

    pub fn last_page(&self) -> Option<Page> {
        self.pages.read().as_ref().and_then(|s| s.last().cloned())
    }

    pub fn page_count(&self) -> usize {
        self.pages.read().as_ref().map_or(0, PageStore::page_count)
    }

    pub fn record_count(&self) -> usize {
        self.pages
            .read()
            .as_ref()
            .map_or(0, PageStore::record_count)
    }

    pub fn bucket_count(&self) -> usize {
        self.index
            .read()
            .as_ref()
            .map_or(0, BucketIndex::bucket_count)
    }
}
