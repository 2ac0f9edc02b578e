//! Collection envelope - the wire wrapper for every paginated listing.

use serde::{Deserialize, Serialize};

/// One page of a collection response.
///
/// ```json
/// {"results": [...], "links": {"self": "...", "prev": "...", "next": "..."}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Records on this page, in server order.
    #[serde(default = "Vec::new", deserialize_with = "nullable_vec")]
    pub results: Vec<T>,
    /// Cursor links.
    #[serde(default)]
    pub links: Links,
}

/// Cursor links of a page.
///
/// Links are opaque relative paths. An absent, null or empty `next` means
/// there are no further pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Path of the current page.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
    /// Path of the previous page.
    #[serde(default)]
    pub prev: Option<String>,
    /// Path of the next page.
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// A single page with no further links.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            results,
            links: Links::default(),
        }
    }

    /// Path of the next page, if any.
    pub fn next_path(&self) -> Option<&str> {
        self.links.next.as_deref().filter(|p| !p.is_empty())
    }

    /// Set the next link.
    pub fn with_next(mut self, next: &str) -> Self {
        self.links.next = Some(next.to_string());
        self
    }

    /// Set the previous link.
    pub fn with_prev(mut self, prev: &str) -> Self {
        self.links.prev = Some(prev.to_string());
        self
    }
}

// `null` collections show up on error bodies and empty listings.
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
