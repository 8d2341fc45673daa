//! Fill-only-empty-fields merge of a chosen candidate into a record.

use crate::{Candidate, MovieRecord};

/// Merge `candidate` into `record`.
///
/// The title is replaced by the canonical one. Year and reference URL
/// are only filled when empty, so curated values survive any number of
/// re-runs. The media format is never touched.
///
/// A candidate field that came out of extraction empty never replaces or
/// fills anything: an empty title keeps the record's title, and an empty id
/// leaves the reference URL alone.
pub fn merge(mut record: MovieRecord, candidate: &Candidate, title_base_url: &str) -> MovieRecord {
    if !candidate.title.is_empty() {
        record.title = candidate.title.clone();
    }
    if record.year.is_empty() {
        record.year = candidate.year.clone();
    }
    if record.reference_url.is_empty() && !candidate.id.is_empty() {
        record.reference_url = candidate.reference_url(title_base_url);
    }
    record
}
