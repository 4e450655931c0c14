use chrono::NaiveDate;

/// Integer tallies for one competition scope. The zeroed record doubles as
/// "no appearances published"; a true unknown is not represented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub matches: u32,
    pub goals: u32,
    pub starting_eleven: u32,
    pub substituted_in: u32,
    pub substituted_out: u32,
    pub yellow_cards: u32,
    pub yellow_red_cards: u32,
    pub red_cards: u32,
}

impl Statistics {
    /// Builds a record from the eight tallies in field order.
    pub fn from_ordered(values: [u32; 8]) -> Self {
        let [matches, goals, starting_eleven, substituted_in, substituted_out, yellow_cards, yellow_red_cards, red_cards] =
            values;
        Self {
            matches,
            goals,
            starting_eleven,
            substituted_in,
            substituted_out,
            yellow_cards,
            yellow_red_cards,
            red_cards,
        }
    }

    /// The eight tallies in the same order `from_ordered` consumes them.
    pub fn as_ordered(&self) -> [u32; 8] {
        [
            self.matches,
            self.goals,
            self.starting_eleven,
            self.substituted_in,
            self.substituted_out,
            self.yellow_cards,
            self.yellow_red_cards,
            self.red_cards,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub nation: String,
    pub position: String,
    pub details_url: String,
    pub team: Option<String>,
    pub club_statistics: Statistics,
    pub nation_statistics: Statistics,
    pub qualification_statistics: Statistics,
}

impl Player {
    /// A freshly parsed roster stub: statistics stay zeroed and the team
    /// unset until the detail pages are visited.
    pub fn stub(
        name: String,
        date_of_birth: NaiveDate,
        nation: String,
        position: String,
        details_url: String,
    ) -> Self {
        Self {
            name,
            date_of_birth,
            nation,
            position,
            details_url,
            team: None,
            club_statistics: Statistics::default(),
            nation_statistics: Statistics::default(),
            qualification_statistics: Statistics::default(),
        }
    }

    /// Whole-year approximation: elapsed days divided by 365, truncated.
    pub fn age_on(&self, reference: NaiveDate) -> i64 {
        (reference - self.date_of_birth).num_days() / 365
    }
}
