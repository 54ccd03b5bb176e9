//! Auto-fill planning
//!
//! Walks empty slots in order and picks, per slot, the best candidate listed
//! under the slot's role who is not already on the field.

use crate::models::{LineupState, PlayerId, PositionEntry, RosterIndex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Ordering among candidates of the same priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the roster's listing order.
    #[default]
    InputOrder,
    /// Higher rating first; unrated players after rated ones, then listing order.
    RatingDesc,
}

/// (slot index, player) pairs to assign. Slots without a role are skipped.
pub fn plan_auto_fill(
    lineup: &LineupState,
    roster: &RosterIndex,
    tie_break: TieBreak,
) -> Vec<(usize, PlayerId)> {
    let mut taken: HashSet<PlayerId> = lineup.assigned_ids().into_iter().cloned().collect();
    let mut plan = Vec::new();

    for (index, slot) in lineup.slots().iter().enumerate() {
        if slot.player_id.is_some() {
            continue;
        }
        let Some(role) = slot.role else {
            continue;
        };

        let best = roster
            .candidates(role)
            .iter()
            .enumerate()
            .filter(|(_, entry)| !taken.contains(&entry.id))
            .min_by(|(ia, a), (ib, b)| compare_candidates(roster, tie_break, a, b).then(ia.cmp(ib)));

        if let Some((_, entry)) = best {
            taken.insert(entry.id.clone());
            plan.push((index, entry.id.clone()));
        } else {
            log::debug!("No free {} candidate for slot {}", role.key(), index);
        }
    }

    plan
}

fn compare_candidates(
    roster: &RosterIndex,
    tie_break: TieBreak,
    a: &PositionEntry,
    b: &PositionEntry,
) -> Ordering {
    let by_tier = a.priority.cmp(&b.priority);
    if by_tier != Ordering::Equal || tie_break == TieBreak::InputOrder {
        return by_tier;
    }
    let rating = |e: &PositionEntry| roster.player(&e.id).and_then(|p| p.rating);
    match (rating(a), rating(b)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldSlotData, Formation, Player, Priority, Role, RosterData};

    fn roster() -> RosterIndex {
        RosterIndex::from_data(
            RosterData::default()
                .with_player("1", Player::new("Keeper A", Some("1"), false).with_rating(6.0))
                .with_player("2", Player::new("Keeper B", Some("2"), false).with_rating(8.5))
                .with_player("3", Player::new("Def A", Some("3"), false))
                .with_player("4", Player::new("Def B", Some("4"), false).with_rating(7.0))
                .with_player("5", Player::new("Mid A", Some("5"), false))
                .with_player("6", Player::new("Fwd A", Some("6"), false))
                .with_position(Role::Goalkeeper, "1", Priority::Medium)
                .with_position(Role::Goalkeeper, "2", Priority::Medium)
                .with_position(Role::Defender, "3", Priority::Low)
                .with_position(Role::Defender, "4", Priority::High)
                .with_position(Role::Defender, "1", Priority::High)
                .with_position(Role::Midfielder, "5", Priority::High)
                .with_position(Role::Midfielder, "4", Priority::Medium)
                .with_position(Role::Forward, "6", Priority::Low),
        )
    }

    fn ids(plan: &[(usize, PlayerId)]) -> Vec<(usize, &str)> {
        plan.iter().map(|(i, p)| (*i, p.as_str())).collect()
    }

    #[test]
    fn test_priority_then_input_order() {
        let roster = roster();
        let lineup = LineupState::from_formation(Formation::F1221);
        let plan = plan_auto_fill(&lineup, &roster, TieBreak::InputOrder);
        // GK: 1 and 2 tie on medium, listing order picks 1.
        // DEF: 4 (high) then 1 is taken, so 3 (low).
        // MID: 5 (high); 4 already placed, nobody left for the second slot.
        assert_eq!(ids(&plan), vec![(0, "1"), (1, "4"), (2, "3"), (3, "5"), (5, "6")]);
    }

    #[test]
    fn test_rating_tie_break() {
        let roster = roster();
        let lineup = LineupState::from_formation(Formation::F1221);
        let plan = plan_auto_fill(&lineup, &roster, TieBreak::RatingDesc);
        assert_eq!(plan[0], (0, PlayerId::from("2")));
        // Player 1 is now free for defence and is high priority.
        assert_eq!(plan[1], (1, PlayerId::from("4")));
        assert_eq!(plan[2], (2, PlayerId::from("1")));
    }

    #[test]
    fn test_skips_filled_and_roleless_slots() {
        let roster = roster();
        let field = vec![
            FieldSlotData { class: "goalkeeper".into(), style: None, anchor: None, id: Some("5".into()) },
            FieldSlotData { class: "libero".into(), style: None, anchor: None, id: None },
            FieldSlotData { class: "defender-1".into(), style: None, anchor: None, id: None },
        ];
        let lineup = LineupState::from_field(&field, &roster, Formation::F1221);
        let plan = plan_auto_fill(&lineup, &roster, TieBreak::InputOrder);
        assert_eq!(ids(&plan), vec![(2, "4")]);
    }

    #[test]
    fn test_never_picks_players_already_on_field() {
        let roster = roster();
        let field = vec![
            FieldSlotData { class: "forward".into(), style: None, anchor: None, id: Some("4".into()) },
            FieldSlotData { class: "defender-1".into(), style: None, anchor: None, id: None },
        ];
        let lineup = LineupState::from_field(&field, &roster, Formation::F1221);
        let plan = plan_auto_fill(&lineup, &roster, TieBreak::InputOrder);
        assert_eq!(ids(&plan), vec![(1, "1")]);
    }
}
