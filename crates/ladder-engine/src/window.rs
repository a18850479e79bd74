//! Pagination and around-me window arithmetic.
//!
//! All positions here are zero-based descending ranks, the same indices the
//! store's range primitive takes. Bounds are inclusive.

/// `ceil(total_members / page_size)`.
#[must_use]
pub fn total_pages(total_members: usize, page_size: usize) -> usize {
    total_members.div_ceil(page_size)
}

/// Inclusive index range covered by `page` (1-based). Page 0 is treated as
/// page 1.
#[must_use]
pub fn page_bounds(page: usize, page_size: usize) -> (usize, usize) {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    (start, start.saturating_add(page_size - 1))
}

/// Inclusive index range of the around-me window for a member at zero-based
/// rank `rank`.
///
/// The window starts `floor(page_size / 2) - 1` places above the member, so
/// it leans one position toward better ranks than a centred window would.
/// Consumers rely on these exact boundaries.
#[must_use]
pub fn around_me_bounds(rank: usize, page_size: usize) -> (usize, usize) {
    let half = page_size / 2;
    let start = (rank + 1).saturating_sub(half);
    (start, start.saturating_add(page_size - 1))
}
