use crate::error::Result;
use crate::processor::Player;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// Fixed tab-separated layout: identity columns, then the statistics blocks.
// The qualification block is a configuration toggle, not a separate product.
const IDENTITY_COLUMNS: [&str; 5] = ["Name", "Nation", "Verein", "Position", "Alter"];
const QUALIFICATION_COLUMNS: [&str; 8] = [
    "Spiele (Quali)",
    "Tore (Quali)",
    "Startelf (Quali)",
    "Ein (Quali)",
    "Aus (Quali)",
    "Gelb (Quali)",
    "Gelb-rot (Quali)",
    "Rot (Quali)",
];
const NATION_COLUMNS: [&str; 8] = [
    "Spiele", "Tore", "Startelf", "Ein", "Aus", "Gelb", "Gelb-rot", "Rot",
];
const CLUB_COLUMNS: [&str; 8] = [
    "Spiele (V)",
    "Tore (V)",
    "Startelf (V)",
    "Einwechslungen (V)",
    "Auswechslungen (V)",
    "Gelb (V)",
    "Gelb-rot (V)",
    "Rot (V)",
];

pub struct CsvExporter {
    reference_date: NaiveDate,
    include_qualification: bool,
}

impl CsvExporter {
    pub fn new(reference_date: NaiveDate, include_qualification: bool) -> Self {
        Self {
            reference_date,
            include_qualification,
        }
    }

    pub fn export_to_file(&self, players: &[Player], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.export(players, file)
    }

    /// Writes the header line and one line per player. The writer is flushed
    /// before it is dropped on every path.
    pub fn export<W: Write>(&self, players: &[Player], writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        let mut header: Vec<&str> = IDENTITY_COLUMNS.to_vec();
        if self.include_qualification {
            header.extend(QUALIFICATION_COLUMNS);
        }
        header.extend(NATION_COLUMNS);
        header.extend(CLUB_COLUMNS);
        csv.write_record(&header)?;

        for player in players {
            let mut record: Vec<String> = vec![
                player.name.trim().to_string(),
                player.nation.trim().to_string(),
                player.team.as_deref().unwrap_or("").trim().to_string(),
                player.position.trim().to_string(),
                player.age_on(self.reference_date).to_string(),
            ];
            if self.include_qualification {
                record.extend(player.qualification_statistics.as_ordered().map(|v| v.to_string()));
            }
            record.extend(player.nation_statistics.as_ordered().map(|v| v.to_string()));
            record.extend(player.club_statistics.as_ordered().map(|v| v.to_string()));
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }
}
