use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::domain::{Classification, GameId, GameRecord, Metric, MetricSnapshot, PlayRecord};
use crate::hindex::h_index_from_sorted_desc;
use crate::metrics;
use crate::suggest::sampling;
use crate::tiers::{CostClubSemantics, TierCollection, TierSemantics};

/// One recommended game. A game hit by several strategies carries all of
/// their reasons and stats, in the order the strategies ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub game_id: GameId,
    pub name: String,
    pub reasons: Vec<String>,
    pub stats: Vec<String>,
}

struct StrategyHit {
    game_id: GameId,
    name: String,
    reason: String,
    stat: String,
}

/// Cumulative per-game state the strategies share; built once per call
struct Aggregate<'a> {
    game: &'a GameRecord,
    days: BTreeSet<NaiveDate>,
    play_count: u32,
    total_minutes: i64,
    last_play: Option<NaiveDate>,
    price_paid: Option<f64>,
}

impl Aggregate<'_> {
    fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            play_count: self.play_count,
            unique_days: self.days.len() as u32,
            total_minutes: self.total_minutes,
        }
    }

    fn value(&self, metric: Metric) -> f64 {
        metrics::metric_value(&self.snapshot(), metric)
    }
}

/// Composes milestone, cost-club and h-index state into a deduplicated,
/// ranked recommendation list. The injected RNG is the sole source of
/// nondeterminism; a seeded generator makes a call fully reproducible.
pub struct SuggestionEngine {
    milestones: TierCollection,
    cost_clubs: TierCollection,
    recent_window_days: i64,
    experimental: bool,
}

impl SuggestionEngine {
    pub fn from_config(config: &AnalyticsConfig) -> Result<Self> {
        Ok(Self {
            milestones: TierCollection::ascending(config.milestones.thresholds.clone())?,
            cost_clubs: TierCollection::descending(config.cost_clubs.thresholds.clone())?,
            recent_window_days: config.suggestions.recent_window_days,
            experimental: config.suggestions.experimental,
        })
    }

    /// Run every strategy in its fixed order against the owned base games
    pub fn suggest<R: Rng>(
        &self,
        games: &[GameRecord],
        plays: &[PlayRecord],
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<Suggestion> {
        let aggregates = self.build_aggregates(games, plays);

        let mut hits: Vec<StrategyHit> = Vec::new();
        hits.extend(self.recently_played_fewest_sessions(&aggregates, today, rng));
        hits.extend(self.longest_unplayed(&aggregates, rng));
        for metric in Metric::ALL {
            hits.extend(self.next_h_index(&aggregates, metric, rng));
        }
        for metric in Metric::ALL {
            hits.extend(self.next_milestone(&aggregates, metric, rng));
        }
        if self.experimental {
            for metric in Metric::ALL {
                hits.extend(self.next_cost_club(&aggregates, metric, rng));
            }
        }
        hits.extend(self.never_played(&aggregates, rng));

        let suggestions = merge_hits(hits);
        info!(
            "{} suggestion(s) from {} eligible game(s)",
            suggestions.len(),
            aggregates.len()
        );
        suggestions
    }

    fn build_aggregates<'a>(
        &self,
        games: &'a [GameRecord],
        plays: &[PlayRecord],
    ) -> Vec<Aggregate<'a>> {
        games
            .iter()
            .filter(|game| game.is_owned() && game.classification == Classification::BaseGame)
            .map(|game| {
                let mut aggregate = Aggregate {
                    game,
                    days: BTreeSet::new(),
                    play_count: 0,
                    total_minutes: 0,
                    last_play: None,
                    price_paid: self.experimental.then(|| game.price_paid()).flatten(),
                };
                for play in plays.iter().filter(|p| p.game_id == game.id) {
                    aggregate.play_count += 1;
                    aggregate.total_minutes += play.duration_minutes;
                    aggregate.days.insert(play.date);
                    if aggregate.last_play.is_none_or(|last| play.date > last) {
                        aggregate.last_play = Some(play.date);
                    }
                }
                aggregate
            })
            .collect()
    }

    /// Strategy 1: among games played inside the recent window, the ones
    /// tied for fewest distinct play-days, picked uniformly
    fn recently_played_fewest_sessions<R: Rng>(
        &self,
        aggregates: &[Aggregate],
        today: NaiveDate,
        rng: &mut R,
    ) -> Option<StrategyHit> {
        let cutoff = today - Duration::days(self.recent_window_days);
        let recent: Vec<&Aggregate> = aggregates
            .iter()
            .filter(|a| a.last_play.is_some_and(|d| d >= cutoff))
            .collect();
        let fewest = recent.iter().map(|a| a.days.len()).min()?;
        let tied: Vec<&&Aggregate> = recent.iter().filter(|a| a.days.len() == fewest).collect();

        let pick = sampling::uniform_pick(&tied, rng)?;
        Some(hit(
            pick.game,
            format!(
                "played in the last {} days but still fresh",
                self.recent_window_days
            ),
            format!("{fewest} sessions"),
        ))
    }

    /// Strategy 2: uniformly among played games tied for oldest last play
    fn longest_unplayed<R: Rng>(
        &self,
        aggregates: &[Aggregate],
        rng: &mut R,
    ) -> Option<StrategyHit> {
        let played: Vec<&Aggregate> = aggregates
            .iter()
            .filter(|a| a.last_play.is_some())
            .collect();
        let oldest = played.iter().filter_map(|a| a.last_play).min()?;
        let tied: Vec<&&Aggregate> = played
            .iter()
            .filter(|a| a.last_play == Some(oldest))
            .collect();

        let pick = sampling::uniform_pick(&tied, rng)?;
        Some(hit(
            pick.game,
            "longest on the shelf".to_string(),
            format!("last played {oldest}"),
        ))
    }

    /// Strategy 3: games that could lift the metric's h-index to the next
    /// integer. The pool is every candidate at or above the value found at
    /// the needed rank, deliberately wider than a single tie group.
    fn next_h_index<R: Rng>(
        &self,
        aggregates: &[Aggregate],
        metric: Metric,
        rng: &mut R,
    ) -> Option<StrategyHit> {
        let mut values: Vec<f64> = aggregates.iter().map(|a| a.value(metric)).collect();
        values.sort_by(|a, b| b.total_cmp(a));
        let h = h_index_from_sorted_desc(&values);
        let target = (h + 1) as f64;

        let at_target = aggregates
            .iter()
            .filter(|a| a.value(metric) >= target)
            .count();
        let needed = (h + 1).saturating_sub(at_target);
        if needed == 0 {
            return None;
        }

        let mut candidates: Vec<&Aggregate> = aggregates
            .iter()
            .filter(|a| {
                let value = a.value(metric);
                value > 0.0 && value < target
            })
            .collect();
        if candidates.len() < needed {
            return None;
        }
        candidates.sort_by(|a, b| b.value(metric).total_cmp(&a.value(metric)));
        let rank_cutoff = candidates[needed - 1].value(metric);
        let pool: Vec<&Aggregate> = candidates
            .into_iter()
            .filter(|a| a.value(metric) >= rank_cutoff)
            .collect();

        let pick = sampling::uniform_pick(&pool, rng)?;
        Some(hit(
            pick.game,
            format!("would push the {} h-index to {}", metric.as_str(), h + 1),
            format!(
                "{}/{} {}",
                fmt_value(pick.value(metric)),
                h + 1,
                metric.as_str()
            ),
        ))
    }

    /// Strategy 4: per target milestone keep the game(s) with the highest
    /// current value, then sample across tiers with 1/sqrt(group) weights
    fn next_milestone<R: Rng>(
        &self,
        aggregates: &[Aggregate],
        metric: Metric,
        rng: &mut R,
    ) -> Option<StrategyHit> {
        let targeted: Vec<(&Aggregate, f64, f64)> = aggregates
            .iter()
            .filter_map(|a| {
                let value = a.value(metric);
                if value <= 0.0 {
                    return None;
                }
                let target = self.milestones.next_target(value)?;
                Some((a, value, target))
            })
            .collect();

        let closest = keep_closest(&targeted, |a, b| a.total_cmp(b));
        let pick = sampling::weighted_pick(&closest, |(_, _, target)| *target, rng)?;
        let (aggregate, value, target) = pick;
        Some(hit(
            aggregate.game,
            format!(
                "close to the {} {} milestone",
                fmt_value(*target),
                metric.as_str()
            ),
            format!(
                "{}/{} {}",
                fmt_value(*value),
                fmt_value(*target),
                metric.as_str()
            ),
        ))
    }

    /// Strategy 5 (experimental): per cheaper club tier keep the game(s)
    /// needing the fewest whole metric units to cross, then sample across
    /// tiers with 1/sqrt(group) weights
    fn next_cost_club<R: Rng>(
        &self,
        aggregates: &[Aggregate],
        metric: Metric,
        rng: &mut R,
    ) -> Option<StrategyHit> {
        let targeted: Vec<(&Aggregate, f64, f64)> = aggregates
            .iter()
            .filter_map(|a| {
                let price = a.price_paid?;
                let snapshot = a.snapshot();
                let cost = CostClubSemantics.extract_value(a.game, &snapshot, metric)?;
                let target = self.cost_clubs.next_target(cost)?;
                // Whole units still missing before the cost drops to the target
                let units_needed = price / target - metrics::metric_value(&snapshot, metric);
                let steps = units_needed.max(0.0).floor();
                Some((a, steps, target))
            })
            .collect();

        let closest = keep_closest(&targeted, |a, b| b.total_cmp(a));
        let pick = sampling::weighted_pick(&closest, |(_, _, target)| *target, rng)?;
        let (aggregate, steps, target) = pick;
        Some(hit(
            aggregate.game,
            format!(
                "close to the {} per {} club",
                fmt_value(*target),
                metric.as_str()
            ),
            format!(
                "{} more {} to go",
                fmt_value(*steps),
                metric.as_str()
            ),
        ))
    }

    /// Strategy 6: uniformly among owned games never brought to the table
    fn never_played<R: Rng>(&self, aggregates: &[Aggregate], rng: &mut R) -> Option<StrategyHit> {
        let unplayed: Vec<&Aggregate> = aggregates.iter().filter(|a| a.play_count == 0).collect();
        let pick = sampling::uniform_pick(&unplayed, rng)?;
        Some(hit(
            pick.game,
            "never played".to_string(),
            "0 plays".to_string(),
        ))
    }
}

/// Per target tier, keep the entries whose middle field is best under
/// `better` (ties kept). Used for the "closest candidate" step of the
/// milestone and cost-club strategies.
fn keep_closest<'a, 'b>(
    targeted: &'b [(&'a Aggregate<'a>, f64, f64)],
    better: impl Fn(&f64, &f64) -> std::cmp::Ordering,
) -> Vec<(&'a Aggregate<'a>, f64, f64)> {
    let mut best_per_target: Vec<(f64, f64)> = Vec::new();
    for (_, score, target) in targeted {
        match best_per_target.iter_mut().find(|(t, _)| t == target) {
            Some((_, best)) => {
                if better(score, best).is_gt() {
                    *best = *score;
                }
            }
            None => best_per_target.push((*target, *score)),
        }
    }
    targeted
        .iter()
        .filter(|(_, score, target)| {
            best_per_target
                .iter()
                .any(|(t, best)| t == target && score == best)
        })
        .copied()
        .collect()
}

fn merge_hits(hits: Vec<StrategyHit>) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = Vec::new();
    let mut by_game: HashMap<GameId, usize> = HashMap::new();

    for hit in hits {
        match by_game.get(&hit.game_id) {
            Some(&idx) => {
                suggestions[idx].reasons.push(hit.reason);
                suggestions[idx].stats.push(hit.stat);
            }
            None => {
                by_game.insert(hit.game_id, suggestions.len());
                suggestions.push(Suggestion {
                    game_id: hit.game_id,
                    name: hit.name,
                    reasons: vec![hit.reason],
                    stats: vec![hit.stat],
                });
            }
        }
    }
    suggestions
}

fn hit(game: &GameRecord, reason: String, stat: String) -> StrategyHit {
    StrategyHit {
        game_id: game.id,
        name: game.name.clone(),
        reason,
        stat,
    }
}

fn fmt_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
