//! Page-based pagination policy for catalog listings.

/// Fixed number of movies returned per page.
pub const MOVIES_PER_PAGE: u32 = 10;

/// Offset into the result set for a 1-based page number.
pub fn offset_for_page(page: u32) -> i64 {
    (page.max(1) as i64 - 1) * MOVIES_PER_PAGE as i64
}

/// Number of pages needed to show `total` records.
pub fn total_pages(total: i64) -> i64 {
    (total + MOVIES_PER_PAGE as i64 - 1) / MOVIES_PER_PAGE as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(offset_for_page(1), 0);
        // Page 0 is treated as page 1 rather than underflowing.
        assert_eq!(offset_for_page(0), 0);
    }

    #[test]
    fn later_pages_step_by_page_size() {
        assert_eq!(offset_for_page(2), MOVIES_PER_PAGE as i64);
        assert_eq!(offset_for_page(5), 4 * MOVIES_PER_PAGE as i64);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(MOVIES_PER_PAGE as i64), 1);
        assert_eq!(total_pages(MOVIES_PER_PAGE as i64 + 1), 2);
    }
}
