//! Movie metadata resolution: record model, result-page extraction, operator
//! disambiguation, and the fill-only-empty-fields reconciliation loop.

pub mod candidate;
pub mod choose;
mod error;
pub mod extract;
pub mod listing;
pub mod merge;
pub mod prompt;
pub mod reconcile;
pub mod record;
pub mod search;

pub use candidate::Candidate;
pub use choose::{Choice, InvalidSelection, choose};
pub use error::LookupError;
pub use extract::{FindPageParser, ResultParser, extract};
pub use listing::{parse_listing, read_listing, render_listing, write_listing};
pub use merge::merge;
pub use prompt::{Prompter, ScriptedPrompter};
pub use reconcile::{
    LookupDecision, ReconcileOptions, ReconcileStats, Reconciler, SearchFailurePolicy,
};
pub use record::{MovieRecord, Row};
pub use search::{SearchError, SearchService};
