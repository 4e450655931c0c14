use crate::error::{Result, ScrapeError};
use crate::processor::Statistics;
use crate::scrapers::{parse_tally, trimmed_text, TD, TR};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static STANDARD_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.standard_tabelle").unwrap());

const SECTION: &str = "qualification";

// The qualification page carries a single standard table whose second row
// holds the player's totals, with the tallies behind four label cells.
const TOTALS_ROW: usize = 1;
const FIRST_VALUE_CELL: usize = 4;
const VALUE_CELLS: usize = 8;

/// Reads the totals of the qualification tournament page. A missing table or
/// row means no qualification appearances and yields a zeroed record.
pub fn qualification_statistics(document: &Html) -> Result<Statistics> {
    let Some(table) = document.select(&STANDARD_TABLE).next() else {
        return Ok(Statistics::default());
    };
    let Some(row) = table.select(&TR).nth(TOTALS_ROW) else {
        return Ok(Statistics::default());
    };

    let values = row
        .select(&TD)
        .skip(FIRST_VALUE_CELL)
        .take(VALUE_CELLS)
        .map(|cell| parse_tally(&trimmed_text(cell), SECTION))
        .collect::<Result<Vec<u32>>>()?;

    let values: [u32; VALUE_CELLS] =
        values
            .try_into()
            .map_err(|found: Vec<u32>| ScrapeError::MalformedStatistics {
                section: SECTION.to_string(),
                detail: format!(
                    "totals row has {} value cells, expected {VALUE_CELLS}",
                    found.len()
                ),
            })?;

    Ok(Statistics::from_ordered(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUALIFICATION_PAGE: &str = r#"
        <table class="standard_tabelle">
          <tr>
            <th>Wettbewerb</th><th>Mannschaft</th><th>Trikot</th><th>Position</th>
            <th>Spiele</th><th>Tore</th><th>Startelf</th><th>Ein</th>
            <th>Aus</th><th>Gelb</th><th>Gelb-rot</th><th>Rot</th>
          </tr>
          <tr>
            <td>WM-Quali</td><td>Deutschland</td><td>1</td><td>Torwart</td>
            <td>8</td><td>3</td><td>7</td><td>1</td>
            <td>0</td><td>2</td><td>0</td><td>1</td>
          </tr>
        </table>"#;

    #[test]
    fn reads_tallies_at_fixed_offsets() {
        let document = Html::parse_document(QUALIFICATION_PAGE);
        let statistics = qualification_statistics(&document).unwrap();
        assert_eq!(statistics, Statistics::from_ordered([8, 3, 7, 1, 0, 2, 0, 1]));
    }

    #[test]
    fn absent_table_yields_zeroed_record() {
        let document = Html::parse_document("<p>Keine Daten</p>");
        assert_eq!(
            qualification_statistics(&document).unwrap(),
            Statistics::default()
        );
    }

    #[test]
    fn header_only_table_yields_zeroed_record() {
        let document = Html::parse_document(
            r#"<table class="standard_tabelle"><tr><th>Wettbewerb</th></tr></table>"#,
        );
        assert_eq!(
            qualification_statistics(&document).unwrap(),
            Statistics::default()
        );
    }

    #[test]
    fn unparseable_cell_is_fatal() {
        let document = Html::parse_document(
            r#"<table class="standard_tabelle">
                 <tr><th>Wettbewerb</th></tr>
                 <tr><td>WM-Quali</td><td>D</td><td>1</td><td>TW</td>
                     <td>acht</td><td>3</td><td>7</td><td>1</td>
                     <td>0</td><td>2</td><td>0</td><td>1</td></tr>
               </table>"#,
        );
        let err = qualification_statistics(&document).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedStatistics { .. }));
    }

    #[test]
    fn short_totals_row_is_fatal() {
        let document = Html::parse_document(
            r#"<table class="standard_tabelle">
                 <tr><th>Wettbewerb</th></tr>
                 <tr><td>WM-Quali</td><td>D</td><td>1</td><td>TW</td><td>8</td></tr>
               </table>"#,
        );
        let err = qualification_statistics(&document).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedStatistics { .. }));
    }
}
