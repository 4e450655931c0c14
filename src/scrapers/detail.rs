use crate::error::{Result, ScrapeError};
use crate::processor::{Player, Statistics};
use crate::scrapers::{collected_text, parse_tally, section_table, trimmed_text, Section, A, B, TR};
use scraper::Html;

const PROFILE_MARKER: &str = "spieler_profil";

// Emphasized cells of a totals row: one leading season label, then the
// eight tallies in Statistics field order.
const TOTALS_LABEL_CELLS: usize = 1;
const TOTALS_VALUE_CELLS: usize = 8;

/// Fills team and the club/national statistics from the player's profile
/// page. Qualification statistics are left untouched here.
pub fn enrich(player: &mut Player, document: &Html) -> Result<()> {
    if let Some(table) = section_table(document, Section::ClubStations)? {
        player.team = table.select(&B).next().map(trimmed_text);
    }
    player.club_statistics = totals_statistics(document, Section::ClubMatches)?;
    player.nation_statistics = totals_statistics(document, Section::NationalMatches)?;
    Ok(())
}

/// First link in the national-team section that points at the qualification
/// profile of the event. Most players have none.
pub fn find_qualification_link(document: &Html, event_marker: &str) -> Result<Option<String>> {
    let Some(table) = section_table(document, Section::NationalMatches)? else {
        return Ok(None);
    };
    Ok(table
        .select(&A)
        .filter_map(|link| link.value().attr("href"))
        .find(|href| href.contains(PROFILE_MARKER) && href.contains(event_marker))
        .map(str::to_string))
}

/// Reads the `Alle {label}` totals row of a section table. An absent section
/// or totals row means no aggregate was published and yields a zeroed record.
pub fn totals_statistics(document: &Html, section: Section) -> Result<Statistics> {
    let Some(table) = section_table(document, section)? else {
        return Ok(Statistics::default());
    };

    let needle = format!("Alle {}", section.label());
    let Some(row) = table
        .select(&TR)
        .find(|row| collected_text(*row).contains(&needle))
    else {
        return Ok(Statistics::default());
    };

    let values = row
        .select(&B)
        .skip(TOTALS_LABEL_CELLS)
        .take(TOTALS_VALUE_CELLS)
        .map(|cell| parse_tally(&collected_text(cell), section.label()))
        .collect::<Result<Vec<u32>>>()?;

    let values: [u32; TOTALS_VALUE_CELLS] =
        values
            .try_into()
            .map_err(|found: Vec<u32>| ScrapeError::MalformedStatistics {
                section: section.label().to_string(),
                detail: format!(
                    "totals row has {} value cells, expected {TOTALS_VALUE_CELLS}",
                    found.len()
                ),
            })?;

    Ok(Statistics::from_ordered(values))
}
