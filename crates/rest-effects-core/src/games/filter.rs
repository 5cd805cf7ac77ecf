// Pure row predicates for team, season and venue scoping.

use crate::games::record::{GameRecord, Venue};
use chrono::Datelike;

/// Selects a subset of game records. Every `None` field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    pub team: Option<String>,
    pub season: Option<i32>,
    pub venue: Option<Venue>,
    /// Earliest calendar year of `game_date` to keep.
    pub min_year: Option<i32>,
}

impl GameFilter {
    pub fn team(code: impl Into<String>) -> Self {
        GameFilter {
            team: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_venue(mut self, venue: Venue) -> Self {
        self.venue = Some(venue);
        self
    }

    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = Some(year);
        self
    }

    pub fn matches(&self, game: &GameRecord) -> bool {
        self.team.as_deref().map_or(true, |t| game.team == t)
            && self.season.map_or(true, |s| game.season == s)
            && self.venue.map_or(true, |v| game.venue == v)
            && self.min_year.map_or(true, |y| game.game_date.year() >= y)
    }

    /// Return the matching records as a new table.
    pub fn apply(&self, games: &[GameRecord]) -> Vec<GameRecord> {
        games.iter().filter(|g| self.matches(g)).cloned().collect()
    }
}
