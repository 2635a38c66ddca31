use std::collections::HashSet;

use crate::config::PeopleSettings;
use crate::domain::{GameId, PlayRecord};

/// Number of distinct co-participants recorded for one game.
///
/// The configured self id never counts. The configured anonymous id counts
/// once per occurrence, since distinct unnamed guests are indistinguishable
/// and deduplicating them would undercount. Every other id counts once per
/// game no matter how many plays it appears in. Plays without a participant
/// list contribute nothing.
pub fn unique_participants<F>(
    plays: &[PlayRecord],
    game_id: GameId,
    settings: &PeopleSettings,
    keep: F,
) -> u32
where
    F: Fn(&PlayRecord) -> bool,
{
    let mut named = HashSet::new();
    let mut anonymous = 0u32;

    for play in plays {
        if play.game_id != game_id || !keep(play) {
            continue;
        }
        let Some(participants) = &play.participants else {
            continue;
        };
        for &id in participants {
            if id == settings.self_participant {
                continue;
            }
            if id == settings.anonymous_participant {
                anonymous += 1;
            } else {
                named.insert(id);
            }
        }
    }

    named.len() as u32 + anonymous
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn settings() -> PeopleSettings {
        PeopleSettings {
            self_participant: 99,
            anonymous_participant: 1,
        }
    }

    fn play(game_id: GameId, day: u32, participants: Option<Vec<i64>>) -> PlayRecord {
        PlayRecord {
            game_id,
            date: NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            duration_minutes: 60,
            participants,
            location_id: None,
        }
    }

    #[test]
    fn test_self_excluded_anonymous_per_occurrence() {
        let plays = vec![play(1, 1, Some(vec![99, 1, 1, 2]))];
        assert_eq!(unique_participants(&plays, 1, &settings(), |_| true), 3);
    }

    #[test]
    fn test_named_ids_dedup_across_plays() {
        let plays = vec![
            play(1, 1, Some(vec![99, 2, 3])),
            play(1, 2, Some(vec![99, 2, 4])),
        ];
        assert_eq!(unique_participants(&plays, 1, &settings(), |_| true), 3);
    }

    #[test]
    fn test_plays_without_participants_contribute_nothing() {
        let plays = vec![play(1, 1, None), play(1, 2, Some(vec![2]))];
        assert_eq!(unique_participants(&plays, 1, &settings(), |_| true), 1);
    }
}
