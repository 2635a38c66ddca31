use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::{GameId, GameRecord, Metric, PlayRecord};
use crate::metrics;
use crate::tiers::collection::{Direction, TierCollection};
use crate::tiers::semantics::TierSemantics;

/// Optional predicate narrowing which games an operation considers
pub type GameFilter<'a> = Option<&'a dyn Fn(&GameRecord) -> bool>;

/// One game's membership in a tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierMembership {
    pub game_id: GameId,
    pub value: f64,
}

/// A game that entered a tier this year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntrant {
    pub game_id: GameId,
    pub value: f64,
    /// Contribution from plays dated within the year only, not cumulative
    pub this_year_value: f64,
}

/// Generic, configuration-driven computation over one tier collection and one
/// value semantics. All operations are pure functions of their arguments.
pub struct TierEngine<S: TierSemantics> {
    collection: TierCollection,
    semantics: S,
}

impl<S: TierSemantics> TierEngine<S> {
    pub fn new(collection: TierCollection, semantics: S) -> Self {
        Self {
            collection,
            semantics,
        }
    }

    pub fn collection(&self) -> &TierCollection {
        &self.collection
    }

    fn cumulative_value(
        &self,
        game: &GameRecord,
        plays: &[PlayRecord],
        year: Option<i32>,
        metric: Metric,
    ) -> Option<f64> {
        let snapshot = metrics::snapshot(plays, game.id, year);
        self.semantics.extract_value(game, &snapshot, metric)
    }

    fn filtered<'a>(&self, games: &'a [GameRecord], filter: GameFilter) -> Vec<&'a GameRecord> {
        games
            .iter()
            .filter(|&game| filter.is_none_or(|keep| keep(game)))
            .collect()
    }

    /// Members of `tier` as of `year`, sorted best-first: highest value for
    /// ascending collections, lowest for descending. Ties keep input order.
    pub fn games_in_tier(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        year: Option<i32>,
        metric: Metric,
        tier: f64,
        filter: GameFilter,
    ) -> Vec<TierMembership> {
        let mut members: Vec<TierMembership> = self
            .filtered(games, filter)
            .into_iter()
            .filter_map(|game| {
                let value = self.cumulative_value(game, plays, year, metric)?;
                self.semantics
                    .is_member(&self.collection, value, tier)
                    .then_some(TierMembership {
                        game_id: game.id,
                        value,
                    })
            })
            .collect();

        match self.collection.direction() {
            Direction::Ascending => members.sort_by(|a, b| b.value.total_cmp(&a.value)),
            Direction::Descending => members.sort_by(|a, b| a.value.total_cmp(&b.value)),
        }
        members
    }

    pub fn count_in_tier(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        year: Option<i32>,
        metric: Metric,
        tier: f64,
        filter: GameFilter,
    ) -> usize {
        self.games_in_tier(games, plays, year, metric, tier, filter)
            .len()
    }

    /// Membership count change between the year and the one before it
    pub fn yearly_increase(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        year: i32,
        metric: Metric,
        tier: f64,
        filter: GameFilter,
    ) -> i64 {
        let current = self.count_in_tier(games, plays, Some(year), metric, tier, filter) as i64;
        let previous = self.count_in_tier(games, plays, Some(year - 1), metric, tier, filter) as i64;
        current - previous
    }

    /// Games in the tier as of `year` that were not members as of `year - 1`.
    /// No resolvable value in the previous year counts as not-in-tier.
    pub fn new_entrants(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        year: i32,
        metric: Metric,
        tier: f64,
        filter: GameFilter,
    ) -> Vec<NewEntrant> {
        let previous_ids: HashSet<GameId> = self
            .games_in_tier(games, plays, Some(year - 1), metric, tier, filter)
            .into_iter()
            .map(|m| m.game_id)
            .collect();

        let entrants: Vec<NewEntrant> = self
            .games_in_tier(games, plays, Some(year), metric, tier, filter)
            .into_iter()
            .filter(|m| !previous_ids.contains(&m.game_id))
            .map(|m| {
                let this_year = games
                    .iter()
                    .find(|g| g.id == m.game_id)
                    .and_then(|game| {
                        let snapshot = metrics::snapshot_in_year(plays, game.id, year);
                        self.semantics.extract_value(game, &snapshot, metric)
                    })
                    .unwrap_or(0.0);
                NewEntrant {
                    game_id: m.game_id,
                    value: m.value,
                    this_year_value: this_year,
                }
            })
            .collect();

        debug!(
            "{} new entrant(s) for tier {} ({}) in {}",
            entrants.len(),
            tier,
            metric.as_str(),
            year
        );
        entrants
    }

    /// Games that jumped the tier's entire range between `year - 1` and
    /// `year` without ever being a member: previous value strictly before the
    /// threshold (or unresolvable), current value at or past the next
    /// threshold. Always 0 for the terminal tier.
    pub fn skipped_count(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        year: i32,
        metric: Metric,
        tier: f64,
        filter: GameFilter,
    ) -> usize {
        let bounds = self.collection.bounds(tier);
        let (Some(threshold), Some(next)) = (bounds.threshold, bounds.next_threshold) else {
            return 0;
        };
        let direction = self.collection.direction();

        self.filtered(games, filter)
            .into_iter()
            .filter(|game| {
                let previous = self.cumulative_value(game, plays, Some(year - 1), metric);
                let current = self.cumulative_value(game, plays, Some(year), metric);

                let was_before = match previous {
                    None => true,
                    Some(v) => match direction {
                        Direction::Ascending => v < threshold,
                        Direction::Descending => v > threshold,
                    },
                };
                let now_past = match current {
                    None => false,
                    Some(v) => match direction {
                        Direction::Ascending => v >= next,
                        Direction::Descending => v <= next,
                    },
                };
                was_before && now_past
            })
            .count()
    }
}
