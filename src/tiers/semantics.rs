use crate::domain::{GameRecord, Metric, MetricSnapshot};
use crate::metrics;
use crate::tiers::collection::TierCollection;

/// How a tier family derives a comparable value from a game's history.
///
/// Milestones and cost clubs share the whole engine except for this step,
/// so it is the one seam that varies per family.
pub trait TierSemantics {
    /// The value measured against the thresholds, or None when the game has
    /// no resolvable value (missing data is excluded, never an error)
    fn extract_value(
        &self,
        game: &GameRecord,
        snapshot: &MetricSnapshot,
        metric: Metric,
    ) -> Option<f64>;

    fn is_member(&self, collection: &TierCollection, value: f64, tier: f64) -> bool {
        collection.is_value_in_tier(value, tier)
    }
}

/// Raw metric counts against ascending milestone thresholds
pub struct MilestoneSemantics;

impl TierSemantics for MilestoneSemantics {
    fn extract_value(
        &self,
        _game: &GameRecord,
        snapshot: &MetricSnapshot,
        metric: Metric,
    ) -> Option<f64> {
        Some(metrics::metric_value(snapshot, metric))
    }
}

/// Price paid divided by metric value, against descending club thresholds.
///
/// The ratio is capped at the price itself: one 20-minute play of a 60€ game
/// must not read as 180€/hour turning into 60€/hour after three such plays,
/// nor may a fraction of an hour imply a cost above the purchase price.
pub struct CostClubSemantics;

impl TierSemantics for CostClubSemantics {
    fn extract_value(
        &self,
        game: &GameRecord,
        snapshot: &MetricSnapshot,
        metric: Metric,
    ) -> Option<f64> {
        let price = game.price_paid()?;
        let units = metrics::metric_value(snapshot, metric);
        if units <= 0.0 {
            return Some(price);
        }
        Some((price / units).min(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classification, MetricSnapshot, OwnedCopy};

    fn priced_game(price: Option<f64>) -> GameRecord {
        GameRecord {
            id: 1,
            name: "Brass".to_string(),
            classification: Classification::BaseGame,
            copies: vec![OwnedCopy {
                owned: true,
                acquisition_date: None,
                price_paid: price,
            }],
            rating: None,
        }
    }

    #[test]
    fn test_milestone_value_is_raw_metric() {
        let snap = MetricSnapshot {
            play_count: 7,
            unique_days: 4,
            total_minutes: 180,
        };
        let value = MilestoneSemantics.extract_value(&priced_game(None), &snap, Metric::Plays);
        assert_eq!(value, Some(7.0));
    }

    #[test]
    fn test_cost_club_divides_price_by_metric() {
        let snap = MetricSnapshot {
            play_count: 10,
            unique_days: 8,
            total_minutes: 600,
        };
        let value = CostClubSemantics.extract_value(&priced_game(Some(50.0)), &snap, Metric::Hours);
        assert_eq!(value, Some(5.0));
    }

    #[test]
    fn test_cost_club_caps_ratio_at_price() {
        // Half an hour played: 40/0.5 would be 80 per hour, more than the game cost
        let snap = MetricSnapshot {
            play_count: 1,
            unique_days: 1,
            total_minutes: 30,
        };
        let value = CostClubSemantics.extract_value(&priced_game(Some(40.0)), &snap, Metric::Hours);
        assert_eq!(value, Some(40.0));
    }

    #[test]
    fn test_cost_club_unplayed_game_costs_full_price() {
        let snap = MetricSnapshot::default();
        let value = CostClubSemantics.extract_value(&priced_game(Some(25.0)), &snap, Metric::Plays);
        assert_eq!(value, Some(25.0));
    }

    #[test]
    fn test_cost_club_without_price_is_excluded() {
        let snap = MetricSnapshot {
            play_count: 3,
            unique_days: 3,
            total_minutes: 120,
        };
        let value = CostClubSemantics.extract_value(&priced_game(None), &snap, Metric::Plays);
        assert_eq!(value, None);
    }
}
