//! Roster Index
//!
//! `RosterData` is the wire shape delivered by the roster data source.
//! `RosterIndex` is the read-only, validated view the editor works against.

use super::formation::Anchor;
use super::player::{Player, PlayerId};
use super::role::{Priority, Role};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub id: PlayerId,
    #[serde(default = "default_priority")]
    pub priority: Priority,
}

fn default_priority() -> Priority {
    Priority::Unranked
}

impl PositionEntry {
    pub fn new(id: impl Into<PlayerId>, priority: Priority) -> Self {
        Self { id: id.into(), priority }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptainEntry {
    #[serde(default)]
    pub order: u32,
    pub id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRef {
    pub id: PlayerId,
}

/// A previously saved field slot: class tag, placement and occupant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSlotData {
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    #[serde(default)]
    pub id: Option<PlayerId>,
}

impl FieldSlotData {
    pub fn resolved_anchor(&self) -> Anchor {
        match (&self.anchor, &self.style) {
            (Some(anchor), _) => *anchor,
            (None, Some(style)) => Anchor::from_style(style),
            (None, None) => Anchor::new(50.0, 50.0),
        }
    }
}

/// Roster payload as delivered by the data source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterData {
    #[serde(default)]
    pub players: BTreeMap<PlayerId, Player>,
    /// Role key -> ordered candidate entries. Keys are free text in the source data.
    #[serde(default)]
    pub positions: BTreeMap<String, Vec<PositionEntry>>,
    #[serde(default)]
    pub captains: Vec<CaptainEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<StaffRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Vec<FieldSlotData>>,
}

impl RosterData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_player(mut self, id: &str, player: Player) -> Self {
        self.players.insert(PlayerId::from(id), player);
        self
    }

    pub fn with_position(mut self, role: Role, id: &str, priority: Priority) -> Self {
        self.positions
            .entry(role.key().to_string())
            .or_default()
            .push(PositionEntry::new(id, priority));
        self
    }

    pub fn with_captain(mut self, order: u32, id: &str) -> Self {
        self.captains.push(CaptainEntry { order, id: PlayerId::from(id) });
        self
    }

    pub fn with_head_coach(mut self, id: &str) -> Self {
        self.dt = Some(StaffRef { id: PlayerId::from(id) });
        self
    }

    pub fn with_field(mut self, field: Vec<FieldSlotData>) -> Self {
        self.field = Some(field);
        self
    }
}

/// Read-only roster view. Built once per session.
#[derive(Debug, Clone, Default)]
pub struct RosterIndex {
    players: BTreeMap<PlayerId, Player>,
    order: Vec<PlayerId>,
    positions: BTreeMap<Role, Vec<PositionEntry>>,
    captains: Vec<CaptainEntry>,
    head_coach: Option<PlayerId>,
    field: Option<Vec<FieldSlotData>>,
}

impl RosterIndex {
    /// Build the index, dropping references to players that do not exist.
    pub fn from_data(data: RosterData) -> Self {
        let RosterData { players, positions, captains, dt, field } = data;

        let mut order: Vec<PlayerId> = players.keys().cloned().collect();
        order.sort_by(|a, b| match (a.numeric(), b.numeric()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        });

        let mut by_role: BTreeMap<Role, Vec<PositionEntry>> = BTreeMap::new();
        for (key, entries) in positions {
            let Some(role) = Role::from_key(&key) else {
                log::warn!("Ignoring unknown position key '{}'", key);
                continue;
            };
            let list = by_role.entry(role).or_default();
            for entry in entries {
                if !players.contains_key(&entry.id) {
                    log::warn!("Dropping {} entry for unknown player {}", role.key(), entry.id);
                    continue;
                }
                if list.iter().any(|e| e.id == entry.id) {
                    continue;
                }
                list.push(entry);
            }
        }

        let mut captains: Vec<CaptainEntry> = captains
            .into_iter()
            .filter(|c| {
                let known = players.contains_key(&c.id);
                if !known {
                    log::warn!("Dropping captain entry for unknown player {}", c.id);
                }
                known
            })
            .collect();
        captains.sort_by_key(|c| c.order);

        let head_coach = dt.map(|d| d.id).filter(|id| {
            let known = players.contains_key(id);
            if !known {
                log::warn!("Head coach {} is not in the roster", id);
            }
            known
        });

        log::info!(
            "Roster indexed: {} players, {} role lists, {} captains",
            players.len(),
            by_role.len(),
            captains.len()
        );

        Self { players, order, positions: by_role, captains, head_coach, field }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_data(RosterData::from_json(json)?))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    /// Player ids with numeric ids ascending first, then the rest lexicographically.
    pub fn ordered_ids(&self) -> &[PlayerId] {
        &self.order
    }

    /// Players sorted by jersey number; unnumbered players last, ties by id order.
    pub fn players_by_number(&self) -> Vec<(&PlayerId, &Player)> {
        let mut list: Vec<(&PlayerId, &Player)> =
            self.order.iter().filter_map(|id| self.players.get(id).map(|p| (id, p))).collect();
        list.sort_by_key(|(_, p)| p.jersey_number().unwrap_or(u32::MAX));
        list
    }

    /// Ordered candidate list for a role, as given by the data source.
    pub fn candidates(&self, role: Role) -> &[PositionEntry] {
        self.positions.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every (role, priority) pair the player is listed under, in role order.
    pub fn roles_for(&self, id: &PlayerId) -> Vec<(Role, Priority)> {
        self.positions
            .iter()
            .filter_map(|(role, entries)| {
                entries.iter().find(|e| &e.id == id).map(|e| (*role, e.priority))
            })
            .collect()
    }

    pub fn has_role(&self, id: &PlayerId, role: Role) -> bool {
        self.candidates(role).iter().any(|e| &e.id == id)
    }

    pub fn is_veteran(&self, id: &PlayerId) -> bool {
        self.players.get(id).map(|p| p.veteran).unwrap_or(false)
    }

    pub fn veterans(&self) -> Vec<&PlayerId> {
        self.order.iter().filter(|id| self.is_veteran(id)).collect()
    }

    pub fn veteran_set(&self) -> HashSet<&PlayerId> {
        self.veterans().into_iter().collect()
    }

    /// Captains in armband order.
    pub fn captains(&self) -> &[CaptainEntry] {
        &self.captains
    }

    pub fn head_coach(&self) -> Option<(&PlayerId, &Player)> {
        let id = self.head_coach.as_ref()?;
        self.players.get(id).map(|p| (id, p))
    }

    /// Saved field layout shipped with the roster, if any.
    pub fn initial_field(&self) -> Option<&[FieldSlotData]> {
        self.field.as_deref()
    }

    /// Re-export the validated index in wire shape.
    pub fn to_data(&self) -> RosterData {
        RosterData {
            players: self.players.clone(),
            positions: self
                .positions
                .iter()
                .map(|(role, entries)| (role.key().to_string(), entries.clone()))
                .collect(),
            captains: self.captains.clone(),
            dt: self.head_coach.clone().map(|id| StaffRef { id }),
            field: self.field.clone(),
        }
    }
}
