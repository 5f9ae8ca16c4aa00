//! In-memory pagination over an ordered list
//!
//! The strategies materialize and sort their full result set before
//! slicing, so paging happens here rather than in a database query.

use crate::models::{Page, PageRequest};

/// Slice an ordered list into one page.
///
/// `total_elements` always reports the full pre-slice length; an
/// out-of-range page index yields empty content rather than an error.
pub fn paginate<T>(ordered: Vec<T>, page: &PageRequest) -> Page<T> {
    let total_elements = ordered.len();
    let start = page.index.saturating_mul(page.size);

    let content = if start >= total_elements {
        Vec::new()
    } else {
        let end = start.saturating_add(page.size).min(total_elements);
        ordered
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect()
    };

    Page {
        content,
        total_elements,
        page_index: page.index,
        page_size: page.size,
    }
}
