//! Batch reconciliation: drives search, extraction, disambiguation and merge
//! over every row of a listing, one row at a time.

use tracing::{info, warn};

use crate::{
    Choice, LookupError, MovieRecord, Prompter, ResultParser, Row, SearchService, choose, merge,
};

pub const DEFAULT_MEDIA_FORMAT: &str = "DVD";
pub const DEFAULT_TITLE_BASE_URL: &str = "https://www.imdb.com/title/";

const CONFIRM_PROMPT: &str = "Do you want to update this movie (y/n, default is No)? ";

/// Whether a row gets looked up at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupDecision {
    SkipBlank,
    /// Every field was present and the operator did not ask for an update.
    SkipCompleteDeclined,
    Proceed,
}

/// What to do when the search collaborator fails for one title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchFailurePolicy {
    /// Warn, leave the record unresolved, and carry on with the batch.
    #[default]
    Skip,
    /// Stop the whole run; nothing gets written.
    Abort,
}

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Prefix that turns a candidate id into a reference URL.
    pub title_base_url: String,
    /// First sticky default offered for the media format.
    pub default_media_format: String,
    pub on_search_error: SearchFailurePolicy,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            title_base_url: DEFAULT_TITLE_BASE_URL.to_string(),
            default_media_format: DEFAULT_MEDIA_FORMAT.to_string(),
            on_search_error: SearchFailurePolicy::default(),
        }
    }
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Non-blank rows seen.
    pub records: usize,
    pub looked_up: usize,
    /// Lookups where the operator picked a candidate.
    pub resolved: usize,
    pub declined: usize,
    pub no_results: usize,
    /// Searches that failed and were skipped.
    pub failed: usize,
}

/// Sequential reconciliation loop over a listing.
///
/// The only state carried from one row to the next is the sticky media
/// format default and the counters.
pub struct Reconciler<'a> {
    search: &'a dyn SearchService,
    parser: &'a dyn ResultParser,
    prompter: &'a mut dyn Prompter,
    options: ReconcileOptions,
    sticky_media: String,
    stats: ReconcileStats,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        search: &'a dyn SearchService,
        parser: &'a dyn ResultParser,
        prompter: &'a mut dyn Prompter,
        options: ReconcileOptions,
    ) -> Self {
        let sticky_media = options.default_media_format.clone();
        Self {
            search,
            parser,
            prompter,
            options,
            sticky_media,
            stats: ReconcileStats::default(),
        }
    }

    pub fn stats(&self) -> ReconcileStats {
        self.stats
    }

    /// Media format that will be offered for the next unresolved record.
    pub fn sticky_media(&self) -> &str {
        &self.sticky_media
    }

    /// Reconcile every row in order. Header and blank rows pass through.
    ///
    /// Rows are returned only once all of them are done, so an interrupted
    /// run never exposes a half-merged record.
    pub async fn reconcile(&mut self, rows: Vec<Row>) -> Result<Vec<Row>, LookupError> {
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let row = match row {
                Row::Movie(record) => Row::Movie(self.reconcile_record(record).await?),
                other => other,
            };
            out.push(row);
        }
        info!(
            records = self.stats.records,
            looked_up = self.stats.looked_up,
            resolved = self.stats.resolved,
            declined = self.stats.declined,
            no_results = self.stats.no_results,
            failed = self.stats.failed,
            "reconciliation complete"
        );
        Ok(out)
    }

    /// Decide whether `record` needs a lookup, asking the operator when every
    /// field is already filled in.
    pub fn decide(&mut self, record: &MovieRecord) -> Result<LookupDecision, LookupError> {
        if record.title.is_empty() {
            return Ok(LookupDecision::SkipBlank);
        }
        if !record.is_complete() {
            return Ok(LookupDecision::Proceed);
        }

        self.prompter.say(&format!(
            "\nMovie: \"{}\"\t({})\t\"{}\"\t{}",
            record.title, record.year, record.reference_url, record.media_format
        ))?;
        loop {
            let answer = self.prompter.ask(CONFIRM_PROMPT)?.trim().to_lowercase();
            match answer.as_str() {
                "" | "n" => return Ok(LookupDecision::SkipCompleteDeclined),
                "y" => return Ok(LookupDecision::Proceed),
                _ => continue,
            }
        }
    }

    async fn reconcile_record(&mut self, record: MovieRecord) -> Result<MovieRecord, LookupError> {
        let mut record = match self.decide(&record)? {
            LookupDecision::SkipBlank => return Ok(record),
            LookupDecision::SkipCompleteDeclined => {
                self.stats.records += 1;
                self.stats.declined += 1;
                record
            }
            LookupDecision::Proceed => {
                self.stats.records += 1;
                self.look_up(record).await?
            }
        };

        if record.media_format.is_empty() {
            record.media_format = self.ask_media_format(&record.title)?;
        }
        Ok(record)
    }

    /// Search, extract, disambiguate and merge one record.
    async fn look_up(&mut self, record: MovieRecord) -> Result<MovieRecord, LookupError> {
        let title = record.title.clone();
        self.prompter.say(&format!("\nLooking up \"{title}\""))?;
        self.stats.looked_up += 1;

        let document = match self.search.search(&title).await {
            Ok(document) => document,
            Err(source) => match self.options.on_search_error {
                SearchFailurePolicy::Abort => {
                    return Err(LookupError::Search {
                        query: title,
                        source,
                    });
                }
                SearchFailurePolicy::Skip => {
                    warn!(title = %title, error = %source, "search failed; leaving record unresolved");
                    self.prompter
                        .say(&format!("WARNING: Lookup failed for \"{title}\": {source}"))?;
                    self.stats.failed += 1;
                    return Ok(record);
                }
            },
        };

        let candidates = self.parser.parse(&document);
        if candidates.is_empty() {
            self.stats.no_results += 1;
        }

        match choose(candidates, &title, &mut *self.prompter)? {
            Choice::Chosen(candidate) => {
                info!(query = %title, title = %candidate.title, year = %candidate.year, "candidate chosen");
                self.stats.resolved += 1;
                Ok(merge(record, &candidate, &self.options.title_base_url))
            }
            Choice::Skip => Ok(record),
        }
    }

    /// Ask for a media format, offering the sticky default. A non-empty
    /// answer becomes the new default.
    fn ask_media_format(&mut self, title: &str) -> Result<String, LookupError> {
        let answer = self.prompter.ask(&format!(
            "Input the media type for \"{title}\" (Press ENTER for \"{}\"): ",
            self.sticky_media
        ))?;
        let answer = answer.trim();
        if !answer.is_empty() {
            self.sticky_media = answer.to_string();
        }
        Ok(self.sticky_media.clone())
    }
}
