use crate::error::{Result, ScrapeError};
use crate::processor::Player;
use crate::scrapers::{child_elements, trimmed_text, TH, TR};
use chrono::NaiveDate;
use scraper::{ElementRef, Html};

const ROSTER_HEADER: &str = "Spieler";
const BIRTH_DATE_FORMAT: &str = "%d.%m.%Y";

// Listing-row schema. Rows with fewer cells are layout artifacts.
const MIN_CELLS: usize = 6;
const NAME_CELL: usize = 0;
const NATION_CELL: usize = 2;
const BIRTH_CELL: usize = 3;
const POSITION_CELL: usize = 5;

/// Locates the roster table on a listing page by its `Spieler` header cell.
pub fn roster_table(document: &Html) -> Result<ElementRef<'_>> {
    let mut headers = document
        .select(&TH)
        .filter(|header| trimmed_text(*header) == ROSTER_HEADER);

    let header = headers
        .next()
        .ok_or_else(|| ScrapeError::MissingTable(ROSTER_HEADER.to_string()))?;
    if headers.next().is_some() {
        return Err(ScrapeError::AmbiguousSection(ROSTER_HEADER.to_string()));
    }

    header
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "table")
        .ok_or_else(|| ScrapeError::MissingTable(ROSTER_HEADER.to_string()))
}

/// Lazily yields one player stub per data row of the roster table.
pub fn parse_roster<'a>(table: ElementRef<'a>) -> impl Iterator<Item = Result<Player>> + 'a {
    table.select(&TR).skip(1).filter_map(|row| {
        let cells: Vec<ElementRef> = child_elements(row, "td").collect();
        if cells.len() < MIN_CELLS {
            return None;
        }
        Some(parse_row(&cells))
    })
}

fn parse_row(cells: &[ElementRef]) -> Result<Player> {
    let name_link = child_elements(cells[NAME_CELL], "a")
        .next()
        .ok_or_else(|| ScrapeError::MalformedRosterRow("player cell has no link".to_string()))?;
    let details_url = name_link
        .value()
        .attr("href")
        .ok_or_else(|| ScrapeError::MalformedRosterRow("player link has no href".to_string()))?
        .to_string();
    let name = trimmed_text(name_link);

    let nation = child_elements(cells[NATION_CELL], "a")
        .next()
        .map(trimmed_text)
        .ok_or_else(|| {
            ScrapeError::MalformedRosterRow(format!("nation cell has no link for {name}"))
        })?;

    let raw_birth = trimmed_text(cells[BIRTH_CELL]);
    let date_of_birth = NaiveDate::parse_from_str(&raw_birth, BIRTH_DATE_FORMAT).map_err(|_| {
        ScrapeError::MalformedRosterRow(format!("unparseable birth date '{raw_birth}' for {name}"))
    })?;

    let position = trimmed_text(cells[POSITION_CELL]);

    Ok(Player::stub(name, date_of_birth, nation, position, details_url))
}
