//! Search-result candidates.

/// One parsed search-result entry, produced for a single lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub year: String,
    /// Opaque identifier appended to the title base URL, e.g. `tt0416449/`.
    pub id: String,
    /// What the operator sees in the selection list, e.g. `Lost (2004) (TV Series)`.
    pub display_label: String,
}

impl Candidate {
    /// Reference URL for this candidate under `title_base_url`.
    pub fn reference_url(&self, title_base_url: &str) -> String {
        format!("{title_base_url}{}", self.id)
    }
}
