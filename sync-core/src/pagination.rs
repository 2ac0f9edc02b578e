//! Page cursor tracking for collection fetches.
//!
//! Collections are returned one page at a time, each page carrying the
//! path of the next one. [`PageCursor`] holds the state of that loop:
//! - The path to request next (`None` once the server stops linking)
//! - Every path already requested (to detect a server that links back)
//! - How many pages were requested (to cap runaway listings)
//!
//! The fetch loop terminates exactly when the cursor becomes empty.

use std::collections::HashSet;
use thiserror::Error;

/// Default cap on pages per fetch.
pub const DEFAULT_MAX_PAGES: usize = 1_000;

/// Reasons a page-following loop is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The server linked back to a page that was already fetched.
    #[error("pagination cycle: {path} was already fetched")]
    Cycle {
        /// The repeated path.
        path: String,
    },

    /// More pages than the configured cap.
    #[error("pagination exceeded {limit} pages")]
    TooManyPages {
        /// The cap that was hit.
        limit: usize,
    },
}

/// Tracks the next page path and the pages already visited.
#[derive(Debug, Clone)]
pub struct PageCursor {
    /// Path to request next.
    next: Option<String>,
    /// Paths already handed out.
    visited: HashSet<String>,
    /// Maximum pages per fetch.
    max_pages: usize,
}

impl PageCursor {
    /// Start a fetch at `path` with the default page cap.
    pub fn start(path: &str) -> Self {
        Self::with_max_pages(path, DEFAULT_MAX_PAGES)
    }

    /// Start a fetch at `path` with an explicit page cap.
    ///
    /// A cap of zero is treated as one: the first page is always fetched.
    pub fn with_max_pages(path: &str, max_pages: usize) -> Self {
        Self {
            next: Some(path.to_string()),
            visited: HashSet::new(),
            max_pages: max_pages.max(1),
        }
    }

    /// Take the path of the next page to request.
    ///
    /// Returns `Ok(None)` when the collection is exhausted.
    pub fn next_path(&mut self) -> Result<Option<String>, PaginationError> {
        let Some(path) = self.next.take() else {
            return Ok(None);
        };

        if self.visited.contains(&path) {
            return Err(PaginationError::Cycle { path });
        }
        if self.visited.len() >= self.max_pages {
            return Err(PaginationError::TooManyPages {
                limit: self.max_pages,
            });
        }

        self.visited.insert(path.clone());
        Ok(Some(path))
    }

    /// Record the `next` link of the page just decoded.
    ///
    /// An absent or empty link ends the fetch.
    pub fn advance(&mut self, next: Option<&str>) {
        self.next = next.filter(|p| !p.is_empty()).map(str::to_string);
    }

    /// True once the server stopped linking to further pages.
    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Number of pages handed out so far.
    pub fn pages_fetched(&self) -> usize {
        self.visited.len()
    }
}
