//! Database query operations, grouped per table.

pub mod image_tags;
pub mod images;

/// Build a `?1, ?2, ...` placeholder list for dynamic `IN (...)` clauses.
pub(crate) fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}
