use crate::filter::{Searchable, filter_rows};

/// Number of rows shown per page in the settings tables.
pub const PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Table controller: search + pagination over an immutable row collection
// ---------------------------------------------------------------------------

/// Filters a row collection by a text query and paginates the result.
///
/// The full row collection is never mutated; the filtered set holds indices
/// into it and is recomputed only when the query (or the whole collection)
/// changes, never on page moves.
#[derive(Debug, Clone)]
pub struct TableController<R> {
    rows: Vec<R>,
    query: String,
    filtered: Vec<usize>,
    page: usize,
    page_size: usize,
}

impl<R: Searchable> TableController<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self::with_page_size(rows, PAGE_SIZE)
    }

    pub fn with_page_size(rows: Vec<R>, page_size: usize) -> Self {
        let filtered = (0..rows.len()).collect();
        Self {
            rows,
            query: String::new(),
            filtered,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Apply a new search query and go back to the first page.
    pub fn set_search(&mut self, query: &str) {
        query.clone_into(&mut self.query);
        self.filtered = filter_rows(&self.rows, &self.query);
        self.page = 1;
    }

    /// Swap the whole row collection (a fresh snapshot), keeping the query.
    pub fn replace_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        let query = std::mem::take(&mut self.query);
        self.set_search(&query);
    }

    /// Rows visible on the current page.
    pub fn page_rows(&self) -> Vec<&R> {
        self.page_indices()
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .collect()
    }

    /// Indices (into the full collection) of the rows on the current page.
    pub fn page_indices(&self) -> &[usize] {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.filtered.len());
        self.filtered.get(start..end).unwrap_or(&[])
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size)
    }

    /// Status text such as `"Page 2 of 5"`.
    pub fn page_indicator(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }

    /// Move to the next page. Returns `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page. Returns `false` when already on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn filtered_rows(&self) -> impl Iterator<Item = &R> {
        self.filtered.iter().filter_map(|&i| self.rows.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct App(String);

    impl Searchable for App {
        fn search_key(&self) -> &str {
            &self.0
        }
    }

    /// 25 rows, 13 of which contain "ab" (in mixed case).
    fn scenario_rows() -> Vec<App> {
        (0..25)
            .map(|i| {
                if i % 2 == 0 {
                    App(format!("{}-Tab{i}", if i % 4 == 0 { "lab" } else { "cAB" }))
                } else {
                    App(format!("app{i}"))
                }
            })
            .collect()
    }

    fn names(rows: &[&App]) -> Vec<String> {
        rows.iter().map(|r| r.0.clone()).collect()
    }

    #[test]
    fn empty_query_shows_everything() {
        let table = TableController::new(scenario_rows());
        assert_eq!(table.filtered_count(), 25);
        assert_eq!(table.total_pages(), 3);
        assert_eq!(table.page_rows().len(), 10);
    }

    #[test]
    fn search_then_paginate_scenario() {
        let mut table = TableController::new(scenario_rows());
        table.set_search("ab");
        assert_eq!(table.filtered_count(), 13);
        assert_eq!(table.total_pages(), 2);
        assert_eq!(table.page_indicator(), "Page 1 of 2");

        let expected: Vec<String> = table.filtered_rows().map(|r| r.0.clone()).collect();
        assert_eq!(names(&table.page_rows()), expected[..10].to_vec());

        assert!(table.next_page());
        assert_eq!(table.page_indicator(), "Page 2 of 2");
        assert_eq!(names(&table.page_rows()), expected[10..].to_vec());
    }

    #[test]
    fn next_page_on_last_page_is_noop() {
        let mut table = TableController::new(scenario_rows());
        table.set_search("ab");
        assert!(table.next_page());
        assert!(!table.next_page());
        assert_eq!(table.page(), 2);
    }

    #[test]
    fn prev_page_on_first_page_is_noop() {
        let mut table = TableController::new(scenario_rows());
        assert!(!table.prev_page());
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn search_resets_to_first_page() {
        let mut table = TableController::new(scenario_rows());
        table.next_page();
        table.next_page();
        assert_eq!(table.page(), 3);
        table.set_search("app");
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn no_matches_renders_zero_pages() {
        let mut table = TableController::new(scenario_rows());
        table.set_search("zzz");
        assert_eq!(table.total_pages(), 0);
        assert!(table.page_rows().is_empty());
        assert_eq!(table.page_indicator(), "Page 1 of 0");
        assert!(!table.next_page());
        assert!(!table.prev_page());
    }

    #[test]
    fn total_pages_is_ceiling_of_count() {
        for count in [0usize, 1, 9, 10, 11, 20, 21, 99, 100] {
            let rows: Vec<App> = (0..count).map(|i| App(format!("row{i}"))).collect();
            let table = TableController::new(rows);
            assert_eq!(table.total_pages(), count.div_ceil(PAGE_SIZE), "count={count}");
        }
    }

    #[test]
    fn page_never_leaves_bounds() {
        let rows: Vec<App> = (0..35).map(|i| App(format!("row{i}"))).collect();
        let mut table = TableController::new(rows);
        for _ in 0..10 {
            table.next_page();
            assert!(table.page() >= 1 && table.page() <= table.total_pages());
        }
        for _ in 0..10 {
            table.prev_page();
            assert!(table.page() >= 1);
        }
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn full_collection_is_untouched_by_search() {
        let original = scenario_rows();
        let mut table = TableController::new(original.clone());
        table.set_search("ab");
        table.next_page();
        assert_eq!(table.rows(), original.as_slice());
    }

    #[test]
    fn replace_rows_keeps_query() {
        let mut table = TableController::new(scenario_rows());
        table.set_search("cab");
        table.replace_rows(vec![App("Cabal.exe".into()), App("other".into())]);
        assert_eq!(table.query(), "cab");
        assert_eq!(table.filtered_count(), 1);
        assert_eq!(table.page(), 1);
    }
}
