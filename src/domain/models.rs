use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub type GameId = i64;
pub type ParticipantId = i64;
pub type LocationId = i64;

/// A single logged play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRecord {
    pub game_id: GameId,
    pub date: NaiveDate,
    /// Minutes at the table; possibly estimated, never negative
    pub duration_minutes: i64,
    pub participants: Option<Vec<ParticipantId>>,
    pub location_id: Option<LocationId>,
}

impl PlayRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// What kind of product a game entry is; exactly one applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    BaseGame,
    Expansion,
    Expandalone,
    Unknown,
}

/// One physical copy in the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedCopy {
    pub owned: bool,
    pub acquisition_date: Option<NaiveDate>,
    pub price_paid: Option<f64>,
}

/// A game in the collection, immutable per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub name: String,
    pub classification: Classification,
    pub copies: Vec<OwnedCopy>,
    pub rating: Option<f64>,
}

impl GameRecord {
    pub fn is_owned(&self) -> bool {
        self.copies.iter().any(|c| c.owned)
    }

    /// Total price paid across priced copies, or None when no copy has a price
    pub fn price_paid(&self) -> Option<f64> {
        let mut total = None;
        for copy in &self.copies {
            if let Some(price) = copy.price_paid {
                *total.get_or_insert(0.0) += price;
            }
        }
        total
    }
}

/// Which per-game quantity an operation measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Hours,
    Sessions,
    Plays,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Hours, Metric::Sessions, Metric::Plays];

    pub fn as_str(&self) -> &str {
        match self {
            Metric::Hours => "hours",
            Metric::Sessions => "sessions",
            Metric::Plays => "plays",
        }
    }
}

/// Cumulative per-game totals as of an optional year cutoff; derived, never stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub play_count: u32,
    pub unique_days: u32,
    pub total_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(owned: bool, price: Option<f64>) -> OwnedCopy {
        OwnedCopy {
            owned,
            acquisition_date: None,
            price_paid: price,
        }
    }

    #[test]
    fn test_ownership_any_copy() {
        let game = GameRecord {
            id: 1,
            name: "Go".to_string(),
            classification: Classification::BaseGame,
            copies: vec![copy(false, None), copy(true, Some(20.0))],
            rating: None,
        };
        assert!(game.is_owned());
    }

    #[test]
    fn test_price_paid_sums_priced_copies() {
        let game = GameRecord {
            id: 2,
            name: "Chess".to_string(),
            classification: Classification::BaseGame,
            copies: vec![
                copy(true, Some(15.0)),
                copy(true, None),
                copy(false, Some(5.0)),
            ],
            rating: None,
        };
        assert_eq!(game.price_paid(), Some(20.0));
    }

    #[test]
    fn test_price_paid_none_without_prices() {
        let game = GameRecord {
            id: 3,
            name: "Checkers".to_string(),
            classification: Classification::Unknown,
            copies: vec![copy(true, None)],
            rating: None,
        };
        assert_eq!(game.price_paid(), None);
    }
}
