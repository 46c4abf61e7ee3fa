use serde::{Deserialize, Serialize};

/// Paginated envelope returned by every TMDB list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn new(page: u32, results: Vec<T>, total_pages: u32) -> Self {
        let total_results = results.len() as u32;
        Self {
            page,
            results,
            total_pages,
            total_results,
        }
    }

    /// An empty page, as TMDB returns past the last page.
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            results: Vec::new(),
            total_pages: page.saturating_sub(1),
            total_results: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
