//! Tab-delimited movie records.

/// Column separator of the listing format.
pub const DELIMITER: &str = "\t";

/// First-column token that marks a header line.
pub const HEADER_TOKEN: &str = "Title";

/// One movie's known metadata. Any field except `title` may be empty.
///
/// Columns are `title, year, reference_url, media_format`, in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: String,
    pub year: String,
    pub reference_url: String,
    /// DVD, BD, VHS, ...
    pub media_format: String,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parse one listing line. Missing trailing columns are empty, fields are
    /// trimmed, and columns past the fourth are ignored.
    pub fn from_line(line: &str) -> Self {
        let mut cols = line.split(DELIMITER).map(str::trim);
        let mut next = || cols.next().unwrap_or_default().to_string();
        Self {
            title: next(),
            year: next(),
            reference_url: next(),
            media_format: next(),
        }
    }

    /// Serialize to one listing line, always with all four columns.
    pub fn to_line(&self) -> String {
        [
            self.title.as_str(),
            self.year.as_str(),
            self.reference_url.as_str(),
            self.media_format.as_str(),
        ]
        .join(DELIMITER)
    }

    /// Year, reference URL and media format are all filled in.
    pub fn is_complete(&self) -> bool {
        !self.year.is_empty() && !self.reference_url.is_empty() && !self.media_format.is_empty()
    }
}

/// One line of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Leading header line, kept verbatim.
    Header(String),
    /// Line with an empty title, kept verbatim.
    Blank(String),
    Movie(MovieRecord),
}

impl Row {
    /// Classify a line. Only the first line of a listing may be a header.
    pub fn from_line(line: &str, first: bool) -> Self {
        let first_col = line.split(DELIMITER).next().unwrap_or_default();
        if first && first_col == HEADER_TOKEN {
            return Row::Header(line.to_string());
        }
        if first_col.trim().is_empty() {
            return Row::Blank(line.to_string());
        }
        Row::Movie(MovieRecord::from_line(line))
    }

    pub fn to_line(&self) -> String {
        match self {
            Row::Header(raw) | Row::Blank(raw) => raw.clone(),
            Row::Movie(record) => record.to_line(),
        }
    }
}
