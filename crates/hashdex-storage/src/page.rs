//! Fixed-capacity pages and the store that partitions records into them.

use hashdex_common::{HashdexError, Result};

/// A fixed-capacity page of records, the unit of "disk" access in the
/// simulator's cost model.
///
/// Pages are numbered sequentially from 0 in creation order and are
/// immutable once their store is built. Only the last page of a store may
/// hold fewer records than its capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    page_number: usize,
    capacity: usize,
    records: Vec<String>,
}

impl Page {
    fn new(page_number: usize, capacity: usize) -> Self {
        Self {
            page_number,
            capacity,
            records: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, record: String) {
        debug_assert!(self.records.len() < self.capacity);
        self.records.push(record);
    }

    /// Returns this page's sequential number within its store.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Returns the maximum number of records this page can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the records stored on this page, in insertion order.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Returns true if this page holds a record exactly equal to `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.records.iter().any(|r| r == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Page{{page_number={}, capacity={}, record_count={}}}",
            self.page_number,
            self.capacity,
            self.records.len()
        )
    }
}

/// An ordered sequence of pages built once from a record sequence.
///
/// The store owns all pages; a reload replaces the store wholesale rather
/// than merging into it.
#[derive(Debug, Clone)]
pub struct PageStore {
    pages: Vec<Page>,
    page_capacity: usize,
    record_count: usize,
}

impl PageStore {
    /// Partitions `records` into sequentially numbered pages of
    /// `page_capacity` records each.
    ///
    /// Records fill pages in input order. A trailing page is only created
    /// when it holds at least one record, so an empty input yields a store
    /// with zero pages. Fails when `page_capacity` is zero.
    pub fn build(records: Vec<String>, page_capacity: usize) -> Result<Self> {
        if page_capacity == 0 {
            return Err(HashdexError::InvalidPageSize {
                size: page_capacity,
            });
        }

        let record_count = records.len();
        let mut pages = Vec::with_capacity(record_count.div_ceil(page_capacity));
        let mut current = Page::new(0, page_capacity);

        for record in records {
            if current.is_full() {
                let next_number = current.page_number + 1;
                pages.push(std::mem::replace(
                    &mut current,
                    Page::new(next_number, page_capacity),
                ));
            }
            current.push(record);
        }

        if !current.is_empty() {
            pages.push(current);
        }

        Ok(Self {
            pages,
            page_capacity,
            record_count,
        })
    }

    /// Returns all pages in page-number order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the page with the given number, if it exists.
    pub fn get(&self, page_number: usize) -> Option<&Page> {
        self.pages.get(page_number)
    }

    /// Returns the first page, or `None` when the store is empty.
    pub fn first(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Returns the last page, or `None` when the store is empty.
    pub fn last(&self) -> Option<&Page> {
        self.pages.last()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates `(page_number, key)` pairs in page order, records in their
    /// original order within each page.
    pub fn iter_records(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.pages.iter().flat_map(|page| {
            page.records()
                .iter()
                .map(move |record| (page.page_number(), record.as_str()))
        })
    }
}
