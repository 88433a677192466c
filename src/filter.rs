// ---------------------------------------------------------------------------
// Row search
// ---------------------------------------------------------------------------

/// A row that can be matched by the table search box.
pub trait Searchable {
    /// The display field the search query is matched against.
    fn search_key(&self) -> &str;
}

/// Filter rows by case-insensitive substring match on their display field.
/// Returns indices of matching rows, in their original order.
pub fn filter_rows<R: Searchable>(rows: &[R], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..rows.len()).collect();
    }
    let lower = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.search_key().to_lowercase().contains(&lower))
        .map(|(i, _)| i)
        .collect()
}
