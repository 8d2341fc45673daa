//! Candidate extraction from a title search results page.
//!
//! The results page is scanned with fixed structural markers rather than a
//! full HTML parse:
//!
//! ```text
//! <h3 class="findSectionHeader"><a name="tt"></a>Titles</h3>
//! ... <td class="result_text"> <a href="/title/tt0411008/" >Lost</a> (2004) (TV Series) </td> ...
//! ... <td class="result_text"> <a href="/title/tt0416449/" >300</a> (2006) </td> ...
//! <h3 class="findSectionHeader"><a name="nm"></a>Names</h3>
//! ```
//!
//! The identifier and the start of the title are located by fixed byte
//! offsets from the anchor, sized for `tt` + 7 digits. Identifiers of any
//! other width yield truncated ids and titles with stray markup; callers see
//! the garbled text instead of an error.

use tracing::debug;

use crate::Candidate;

/// Header of the title results section.
pub const TITLES_SECTION_MARKER: &str =
    r#"<h3 class="findSectionHeader"><a name="tt"></a>Titles</h3>"#;

/// Start of any results section header; ends the title section.
const SECTION_HEADER: &str = r#"<h3 class="findSectionHeader">"#;

/// Start of one result cell.
pub const RESULT_MARKER: &str = r#"<td class="result_text">"#;

const LINK_PREFIX: &str = r#"<a href="/title/"#;
const ANCHOR_END: &str = "</a>";

/// `tt0416449/`
const ID_WIDTH: usize = 10;

/// Length of `<a href="/title/tt0416449/" >`.
const TITLE_OFFSET: usize = LINK_PREFIX.len() + ID_WIDTH + r#"" >"#.len();

/// Turns a raw search results document into ordered candidates.
pub trait ResultParser {
    /// Candidates in document order. A document without results yields an
    /// empty vector, never an error.
    fn parse(&self, document: &str) -> Vec<Candidate>;
}

/// [`ResultParser`] for the title search page. See the module docs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FindPageParser;

impl ResultParser for FindPageParser {
    fn parse(&self, document: &str) -> Vec<Candidate> {
        extract(document)
    }
}

/// Extract every result of the titles section, in document order.
pub fn extract(document: &str) -> Vec<Candidate> {
    let Some(start) = document.find(TITLES_SECTION_MARKER) else {
        debug!("no titles section in results document");
        return Vec::new();
    };
    let body = &document[start + TITLES_SECTION_MARKER.len()..];
    let section = match body.find(SECTION_HEADER) {
        Some(end) => &body[..end],
        None => body,
    };

    let mut candidates = Vec::new();
    let mut cursor = 0;
    while let Some(found) = section[cursor..].find(RESULT_MARKER) {
        let marker = cursor + found;
        let rest = &section[marker + RESULT_MARKER.len()..];
        let cell_len = [rest.find("</td>"), rest.find(RESULT_MARKER)]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(rest.len());

        candidates.push(parse_cell(&rest[..cell_len]));
        cursor = marker + 1;
    }

    debug!(count = candidates.len(), "extracted candidates");
    candidates
}

/// Parse one result cell, bounded by its `</td>` or the next result marker.
/// Missing pieces become empty fields.
fn parse_cell(cell: &str) -> Candidate {
    let anchor = cell.find("<a");
    let id = anchor.map_or("", |a| {
        slice(cell, a + LINK_PREFIX.len(), a + LINK_PREFIX.len() + ID_WIDTH)
    });

    let title_end = cell.find(ANCHOR_END);
    let title = match (anchor, title_end) {
        (Some(a), Some(end)) => slice(cell, a + TITLE_OFFSET, end).trim(),
        _ => "",
    };

    let after = title_end.map_or(0, |end| end + ANCHOR_END.len());
    let open = find_from(cell, b'(', after);
    let close = find_from(cell, b')', after);
    let (year, year_close) = match (open, close) {
        (Some(open), Some(close)) if open < close => {
            (slice(cell, open + 1, close).trim(), Some(close))
        }
        _ => ("", None),
    };

    // A second parenthesised group must start within two bytes of the year's
    // closing paren. Nothing checks what it contains.
    let annotation = year_close.and_then(|close| {
        let limit = (close + 3).min(cell.len());
        let open = close + cell.as_bytes()[close..limit].iter().position(|&b| b == b'(')?;
        let end = find_from(cell, b')', open)?;
        Some(slice(cell, open, end + 1))
    });

    let mut display_label = format!("{title} ({year})");
    if let Some(annotation) = annotation {
        display_label.push(' ');
        display_label.push_str(annotation);
    }

    Candidate {
        title: title.to_string(),
        year: year.to_string(),
        id: id.to_string(),
        display_label,
    }
}

/// Byte index of the first `needle` at or after `from`.
fn find_from(s: &str, needle: u8, from: usize) -> Option<usize> {
    s.as_bytes()
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}

/// `s[start..end]` clamped to the string; empty when the range is inverted
/// or falls inside a multi-byte character.
fn slice(s: &str, start: usize, end: usize) -> &str {
    let end = end.min(s.len());
    if start >= end {
        return "";
    }
    s.get(start..end).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_row(id: &str, title: &str, tail: &str) -> String {
        format!(
            r#"<tr class="findResult odd"> <td class="primary_photo"> <a href="/title/{id}/" ><img src="/img/{id}.jpg" /></a> </td> <td class="result_text"> <a href="/title/{id}/" >{title}</a> {tail} </td> </tr>"#
        )
    }

    fn results_page(rows: &[String]) -> String {
        format!(
            "<html><body>\n\
             <h3 class=\"findSectionHeader\"><a name=\"tt\"></a>Titles</h3>\n\
             <table class=\"findList\">\n{}\n</table>\n\
             <h3 class=\"findSectionHeader\"><a name=\"nm\"></a>Names</h3>\n\
             <table class=\"findList\"><tr> <td class=\"result_text\"> <a href=\"/name/nm0000001/\" >Fred Astaire</a> (Actor) </td> </tr></table>\n\
             </body></html>",
            rows.join("")
        )
    }

    #[test]
    fn no_section_marker_yields_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("<html><body>No results found for \"zzzz\"</body></html>").is_empty());
        // Result cells outside the titles section do not count.
        assert!(extract(&result_row("tt0416449", "300", "(2006)")).is_empty());
    }

    #[test]
    fn empty_titles_section_yields_nothing() {
        assert!(extract(&results_page(&[])).is_empty());
    }

    #[test]
    fn preserves_document_order() {
        let page = results_page(&[
            result_row("tt0416449", "300", "(2006)"),
            result_row("tt0411008", "Lost", "(2004) (TV Series)"),
            result_row("tt0113277", "Heat", "(1995)"),
        ]);
        let found = extract(&page);
        let summary: Vec<(&str, &str, &str)> = found
            .iter()
            .map(|c| (c.title.as_str(), c.year.as_str(), c.id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("300", "2006", "tt0416449/"),
                ("Lost", "2004", "tt0411008/"),
                ("Heat", "1995", "tt0113277/"),
            ]
        );
    }

    #[test]
    fn secondary_annotation_goes_to_label_only() {
        let page = results_page(&[
            result_row("tt0411008", "Lost", "(2004) (TV Series)"),
            result_row("tt0416449", "300", "(2006)"),
        ]);
        let found = extract(&page);
        assert_eq!(found[0].display_label, "Lost (2004) (TV Series)");
        assert_eq!(found[0].year, "2004");
        assert_eq!(found[1].display_label, "300 (2006)");
    }

    #[test]
    fn names_section_is_excluded() {
        let page = results_page(&[result_row("tt0113277", "Heat", "(1995)")]);
        let found = extract(&page);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Heat");
    }

    #[test]
    fn section_without_trailing_header_runs_to_end() {
        let page = format!(
            "{TITLES_SECTION_MARKER}\n{}{}",
            result_row("tt0113277", "Heat", "(1995)"),
            result_row("tt0078748", "Alien", "(1979)"),
        );
        let titles: Vec<String> = extract(&page).into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Heat", "Alien"]);
    }

    #[test]
    fn multibyte_titles_survive() {
        let page = results_page(&[result_row("tt0211915", "Amélie", "(2001)")]);
        let found = extract(&page);
        assert_eq!(found[0].title, "Amélie");
        assert_eq!(found[0].display_label, "Amélie (2001)");
    }

    #[test]
    fn missing_year_degrades_only_that_candidate() {
        let page = results_page(&[
            result_row("tt9999991", "Untitled Project", ""),
            result_row("tt0113277", "Heat", "(1995)"),
        ]);
        let found = extract(&page);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title, "Untitled Project");
        assert_eq!(found[0].year, "");
        assert_eq!(found[0].display_label, "Untitled Project ()");
        assert_eq!(found[1].year, "1995");
    }

    #[test]
    fn cell_without_link_does_not_stop_the_scan() {
        let page = results_page(&[
            r#"<tr> <td class="result_text"> no link here (1999) </td> </tr>"#.to_string(),
            result_row("tt0113277", "Heat", "(1995)"),
        ]);
        let found = extract(&page);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "");
        assert_eq!(found[0].title, "");
        assert_eq!(found[0].year, "1999");
        assert_eq!(found[1].title, "Heat");
        assert_eq!(found[1].id, "tt0113277/");
    }

    #[test]
    fn truncated_document_does_not_panic() {
        let page = format!(
            "{TITLES_SECTION_MARKER}{}<td class=\"result_text\"> <a href=\"/title/tt04",
            result_row("tt0113277", "Heat", "(1995)"),
        );
        let found = extract(&page);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title, "Heat");
        assert_eq!(found[1].id, "tt04");
        assert_eq!(found[1].title, "");
        assert_eq!(found[1].year, "");
    }

    // Known fragility: offsets assume a 7-digit identifier. An 8-digit id
    // loses its trailing slash and the title picks up the anchor's `>`.
    #[test]
    fn eight_digit_id_is_garbled_not_rejected() {
        let page = results_page(&[result_row("tt10872600", "Spider-Man: No Way Home", "(2021)")]);
        let found = extract(&page);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "tt10872600");
        assert_eq!(found[0].title, ">Spider-Man: No Way Home");
        assert_eq!(found[0].year, "2021");
    }

    // Known ambiguity: any parenthesised group right after the year is taken
    // as the annotation, so a disambiguation suffix like `(I)` wins over the
    // media kind that follows it.
    #[test]
    fn first_group_after_year_is_taken_as_annotation() {
        let page = results_page(&[result_row("tt0460791", "Heat", "(2006) (I) (TV Movie)")]);
        let found = extract(&page);
        assert_eq!(found[0].year, "2006");
        assert_eq!(found[0].display_label, "Heat (2006) (I)");
    }

    #[test]
    fn annotation_too_far_from_year_is_ignored() {
        let page = results_page(&[result_row("tt0113277", "Heat", "(1995)    (Video)")]);
        assert_eq!(extract(&page)[0].display_label, "Heat (1995)");
    }

    #[test]
    fn parser_trait_delegates_to_extract() {
        let page = results_page(&[result_row("tt0113277", "Heat", "(1995)")]);
        let parser: &dyn ResultParser = &FindPageParser;
        assert_eq!(parser.parse(&page), extract(&page));
    }
}
