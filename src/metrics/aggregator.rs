use std::collections::BTreeSet;

use crate::domain::{GameId, Metric, MetricSnapshot, PlayRecord};

/// Cumulative totals for one game as of an optional year cutoff.
/// `as_of_year = None` means unbounded.
pub fn snapshot(plays: &[PlayRecord], game_id: GameId, as_of_year: Option<i32>) -> MetricSnapshot {
    accumulate(plays, game_id, |play| match as_of_year {
        Some(year) => play.year() <= year,
        None => true,
    })
}

/// Totals for one game restricted to plays dated within exactly `year`
pub fn snapshot_in_year(plays: &[PlayRecord], game_id: GameId, year: i32) -> MetricSnapshot {
    accumulate(plays, game_id, |play| play.year() == year)
}

fn accumulate<F>(plays: &[PlayRecord], game_id: GameId, keep: F) -> MetricSnapshot
where
    F: Fn(&PlayRecord) -> bool,
{
    let mut play_count = 0u32;
    let mut total_minutes = 0i64;
    let mut days = BTreeSet::new();

    for play in plays {
        if play.game_id != game_id || !keep(play) {
            continue;
        }
        play_count += 1;
        total_minutes += play.duration_minutes;
        days.insert(play.date);
    }

    MetricSnapshot {
        play_count,
        unique_days: days.len() as u32,
        total_minutes,
    }
}

/// Project a snapshot onto one metric axis
pub fn metric_value(snapshot: &MetricSnapshot, metric: Metric) -> f64 {
    match metric {
        Metric::Hours => snapshot.total_minutes as f64 / 60.0,
        Metric::Sessions => snapshot.unique_days as f64,
        Metric::Plays => snapshot.play_count as f64,
    }
}
