//! Listing pagination.
//!
//! Page 1 of a listing lives at `/{base}/`, every later page at
//! `/{base}/page/{n}`. Page numbers are 1-based.

use crate::content::Post;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page {current} is outside 1..={total}")]
    InvalidPageIndex { current: usize, total: usize },

    #[error("a listing has at least one page")]
    EmptyPageCount,
}

/// Position within a paginated listing. Always satisfies
/// `1 <= current <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    total: usize,
}

impl Pagination {
    pub const fn new(current: usize, total: usize) -> Result<Self, PaginationError> {
        if total == 0 {
            return Err(PaginationError::EmptyPageCount);
        }
        if current == 0 || current > total {
            return Err(PaginationError::InvalidPageIndex { current, total });
        }
        Ok(Self { current, total })
    }

    pub const fn current(&self) -> usize {
        self.current
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub const fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub const fn previous_page(&self) -> Option<usize> {
        if self.has_previous() {
            Some(self.current - 1)
        } else {
            None
        }
    }

    pub const fn next_page(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.current + 1)
        } else {
            None
        }
    }

    /// Link to the previous page, `None` on the first page.
    pub fn previous_href(&self, base: &str) -> Option<String> {
        self.previous_page().map(|page| page_href(base, page))
    }

    /// Link to the next page, `None` on the last page.
    pub fn next_href(&self, base: &str) -> Option<String> {
        self.next_page().map(|page| page_href(base, page))
    }
}

/// URL of listing page `page` under `base`.
pub fn page_href(base: &str, page: usize) -> String {
    if page <= 1 {
        format!("/{base}/")
    } else {
        format!("/{base}/page/{page}")
    }
}

/// Number of pages needed for `count` items; an empty listing still has one.
pub const fn total_pages(count: usize, per_page: usize) -> usize {
    if count == 0 || per_page == 0 {
        1
    } else {
        count.div_ceil(per_page)
    }
}

/// One listing page: its position and the posts on it.
#[derive(Debug)]
pub struct Page<'a> {
    pub pagination: Pagination,
    pub posts: &'a [Post],
}

/// Split posts into consecutive pages of `per_page`.
///
/// Always yields at least one (possibly empty) page.
pub fn paginate(posts: &[Post], per_page: usize) -> Result<Vec<Page<'_>>, PaginationError> {
    let per_page = per_page.max(1);
    let total = total_pages(posts.len(), per_page);

    (1..=total)
        .map(|current| {
            let start = (current - 1) * per_page;
            let end = (start + per_page).min(posts.len());
            Ok(Page {
                pagination: Pagination::new(current, total)?,
                posts: &posts[start.min(end)..end],
            })
        })
        .collect()
}
