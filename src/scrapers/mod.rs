use crate::error::{Result, ScrapeError};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

pub(crate) mod detail;
pub(crate) mod qualification;
pub(crate) mod roster;

pub(crate) static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
pub(crate) static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
pub(crate) static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
pub(crate) static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
pub(crate) static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
pub(crate) static A: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
pub(crate) static B: Lazy<Selector> = Lazy::new(|| Selector::parse("b").unwrap());

/// Logical section keys mapped to the literal `<h2>` labels on the site.
/// Label drift lives here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    ClubStations,
    ClubMatches,
    NationalMatches,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::ClubStations => "Vereinsstationen als Spieler",
            Section::ClubMatches => "Vereinsspiele",
            Section::NationalMatches => "Länderspiele",
        }
    }
}

/// Finds the data table of a section by its heading label.
///
/// No heading means the player has no such section and is not an error.
/// Duplicate headings and a heading without a table both are: the first is a
/// data-integrity violation, the second a page-shape violation.
pub fn section_table<'a>(document: &'a Html, section: Section) -> Result<Option<ElementRef<'a>>> {
    let label = section.label();
    let mut headings = document
        .select(&H2)
        .filter(|heading| trimmed_text(*heading) == label);

    let Some(heading) = headings.next() else {
        return Ok(None);
    };
    if headings.next().is_some() {
        return Err(ScrapeError::AmbiguousSection(label.to_string()));
    }

    // The heading sits two levels below its section container.
    let container = heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .nth(1)
        .ok_or_else(|| ScrapeError::MissingTable(label.to_string()))?;

    container
        .select(&TABLE)
        .next()
        .map(Some)
        .ok_or_else(|| ScrapeError::MissingTable(label.to_string()))
}

pub(crate) fn collected_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

pub(crate) fn trimmed_text(element: ElementRef) -> String {
    collected_text(element).trim().to_string()
}

pub(crate) fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |element| element.value().name() == name)
}

/// Parses one tally cell. A present-but-unparseable value means the page
/// shape changed under us and must surface, unlike an absent row.
pub(crate) fn parse_tally(raw: &str, section: &str) -> Result<u32> {
    let raw = raw.trim();
    raw.parse().map_err(|_| ScrapeError::MalformedStatistics {
        section: section.to_string(),
        detail: format!("'{raw}' is not a number"),
    })
}
