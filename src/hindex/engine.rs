use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::PeopleSettings;
use crate::domain::{GameId, GameRecord, Metric, PlayRecord};
use crate::hindex::people;
use crate::metrics;

/// Largest n such that the n-th largest value is at least n.
/// Scans rank 1 upward and stops at the first rank whose value falls short.
pub fn h_index_from_sorted_desc(values: &[f64]) -> usize {
    let mut h = 0;
    for (rank, value) in values.iter().enumerate() {
        if *value >= (rank + 1) as f64 {
            h = rank + 1;
        } else {
            break;
        }
    }
    h
}

/// The four metric families an h-index can rank games by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HIndexKind {
    Plays,
    Sessions,
    Hours,
    People,
}

impl HIndexKind {
    pub const ALL: [HIndexKind; 4] = [
        HIndexKind::Plays,
        HIndexKind::Sessions,
        HIndexKind::Hours,
        HIndexKind::People,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            HIndexKind::Plays => "plays",
            HIndexKind::Sessions => "sessions",
            HIndexKind::Hours => "hours",
            HIndexKind::People => "people",
        }
    }
}

/// One game's value in a value-descending breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub game_id: GameId,
    pub value: f64,
}

/// A game newly inside the top-h set this year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContributor {
    pub game_id: GameId,
    pub value: f64,
    /// Metric contribution from plays dated within the year only
    pub this_year_value: f64,
}

/// Rank-based analogue of the tier engine: games are compared to their rank
/// in a value-sorted breakdown instead of to fixed thresholds.
pub struct HIndexEngine {
    people: PeopleSettings,
}

impl HIndexEngine {
    pub fn new(people: PeopleSettings) -> Self {
        Self { people }
    }

    fn cumulative_value(
        &self,
        plays: &[PlayRecord],
        game_id: GameId,
        kind: HIndexKind,
        year: Option<i32>,
    ) -> f64 {
        match kind {
            HIndexKind::Plays | HIndexKind::Sessions | HIndexKind::Hours => {
                let snapshot = metrics::snapshot(plays, game_id, year);
                metrics::metric_value(&snapshot, metric_for(kind))
            }
            HIndexKind::People => {
                people::unique_participants(plays, game_id, &self.people, |play| match year {
                    Some(y) => play.year() <= y,
                    None => true,
                }) as f64
            }
        }
    }

    fn year_local_value(
        &self,
        plays: &[PlayRecord],
        game_id: GameId,
        kind: HIndexKind,
        year: i32,
    ) -> f64 {
        match kind {
            HIndexKind::Plays | HIndexKind::Sessions | HIndexKind::Hours => {
                let snapshot = metrics::snapshot_in_year(plays, game_id, year);
                metrics::metric_value(&snapshot, metric_for(kind))
            }
            HIndexKind::People => {
                people::unique_participants(plays, game_id, &self.people, |play| {
                    play.year() == year
                }) as f64
            }
        }
    }

    /// Per-game values sorted descending. Ties keep the input game order, so
    /// the first `h` entries are a stable, reproducible contributor set.
    pub fn breakdown(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        kind: HIndexKind,
        year: Option<i32>,
    ) -> Vec<Contribution> {
        let mut entries: Vec<Contribution> = games
            .iter()
            .map(|game| Contribution {
                game_id: game.id,
                value: self.cumulative_value(plays, game.id, kind, year),
            })
            .collect();
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        entries
    }

    /// The h-index over plays dated up to and including `year`;
    /// None means all time
    pub fn all_time_through_year(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        kind: HIndexKind,
        year: Option<i32>,
    ) -> usize {
        let values: Vec<f64> = self
            .breakdown(games, plays, kind, year)
            .into_iter()
            .map(|c| c.value)
            .collect();
        let h = h_index_from_sorted_desc(&values);
        debug!(
            "{} h-index through {:?}: {}",
            kind.as_str(),
            year,
            h
        );
        h
    }

    pub fn increase(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        kind: HIndexKind,
        year: i32,
    ) -> i64 {
        let current = self.all_time_through_year(games, plays, kind, Some(year)) as i64;
        let previous = self.all_time_through_year(games, plays, kind, Some(year - 1)) as i64;
        current - previous
    }

    /// Games in this year's top-h set that were not in last year's. The list
    /// can be longer than the raw h increase: two games can cross into
    /// contributor status while h rises by only one.
    pub fn new_contributors(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        kind: HIndexKind,
        year: i32,
    ) -> Vec<NewContributor> {
        let current = self.top_h(games, plays, kind, Some(year));
        let previous_ids: HashSet<GameId> = self
            .top_h(games, plays, kind, Some(year - 1))
            .into_iter()
            .map(|c| c.game_id)
            .collect();

        current
            .into_iter()
            .filter(|c| !previous_ids.contains(&c.game_id))
            .map(|c| NewContributor {
                game_id: c.game_id,
                value: c.value,
                this_year_value: self.year_local_value(plays, c.game_id, kind, year),
            })
            .collect()
    }

    fn top_h(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        kind: HIndexKind,
        year: Option<i32>,
    ) -> Vec<Contribution> {
        let mut breakdown = self.breakdown(games, plays, kind, year);
        let values: Vec<f64> = breakdown.iter().map(|c| c.value).collect();
        let h = h_index_from_sorted_desc(&values);
        breakdown.truncate(h);
        breakdown
    }
}

fn metric_for(kind: HIndexKind) -> Metric {
    match kind {
        HIndexKind::Plays => Metric::Plays,
        HIndexKind::Sessions => Metric::Sessions,
        HIndexKind::Hours => Metric::Hours,
        HIndexKind::People => unreachable!("people values are counted, not projected"),
    }
}
