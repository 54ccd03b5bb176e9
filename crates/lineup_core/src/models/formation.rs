//! Formation catalog
//!
//! Static 6-a-side shapes. Every slot template carries its `Role` and a visual
//! anchor expressed in field percentages.

use super::role::Role;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Visual placement of a slot on the field, in percent of the field box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Anchor {
    pub top: f32,
    pub left: f32,
    /// Token is vertically centred on `top` (catalog slots on the middle line).
    #[serde(default)]
    pub centered: bool,
}

impl Anchor {
    pub const fn new(top: f32, left: f32) -> Self {
        Self { top, left, centered: false }
    }

    pub const fn centered(top: f32, left: f32) -> Self {
        Self { top, left, centered: true }
    }

    /// Parse an inline style such as `top: 30%; left: 28%;`.
    ///
    /// Missing coordinates default to the field centre.
    pub fn from_style(style: &str) -> Self {
        let mut anchor = Anchor::new(50.0, 50.0);
        for decl in style.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match prop.trim() {
                "top" => {
                    if let Some(v) = parse_percent(value) {
                        anchor.top = v;
                    }
                }
                "left" => {
                    if let Some(v) = parse_percent(value) {
                        anchor.left = v;
                    }
                }
                "transform" => anchor.centered = value.contains("translateY(-50%)"),
                _ => {}
            }
        }
        anchor
    }

    pub fn to_style(&self) -> String {
        let mut style = format!("top: {}%; left: {}%;", self.top, self.left);
        if self.centered {
            style.push_str(" transform: translateY(-50%);");
        }
        style
    }
}

fn parse_percent(value: &str) -> Option<f32> {
    value.trim_end_matches('%').trim().parse().ok()
}

/// Slot template produced by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormationSlot {
    /// Class tag used for grouping by the rendering layer.
    pub class: &'static str,
    pub role: Role,
    pub anchor: Anchor,
}

const fn slot(class: &'static str, role: Role, anchor: Anchor) -> FormationSlot {
    FormationSlot { class, role, anchor }
}

static F1221_SLOTS: [FormationSlot; 6] = [
    slot("goalkeeper", Role::Goalkeeper, Anchor::centered(50.0, 8.0)),
    slot("defender-1", Role::Defender, Anchor::new(30.0, 28.0)),
    slot("defender-2", Role::Defender, Anchor::new(70.0, 28.0)),
    slot("midfielder-1", Role::Midfielder, Anchor::new(30.0, 55.0)),
    slot("midfielder-2", Role::Midfielder, Anchor::new(70.0, 55.0)),
    slot("forward", Role::Forward, Anchor::centered(50.0, 80.0)),
];

static F1212_SLOTS: [FormationSlot; 6] = [
    slot("goalkeeper", Role::Goalkeeper, Anchor::centered(50.0, 8.0)),
    slot("defender-1", Role::Defender, Anchor::new(25.0, 30.0)),
    slot("defender-2", Role::Defender, Anchor::new(75.0, 30.0)),
    slot("midfielder-1", Role::Midfielder, Anchor::centered(50.0, 55.0)),
    slot("forward", Role::Forward, Anchor::new(30.0, 80.0)),
    slot("forward-2", Role::Forward, Anchor::new(70.0, 80.0)),
];

static F123_SLOTS: [FormationSlot; 6] = [
    slot("goalkeeper", Role::Goalkeeper, Anchor::centered(50.0, 8.0)),
    slot("defender-1", Role::Defender, Anchor::new(30.0, 25.0)),
    slot("defender-2", Role::Defender, Anchor::new(70.0, 25.0)),
    slot("midfielder-1", Role::Midfielder, Anchor::centered(50.0, 50.0)),
    slot("forward", Role::Forward, Anchor::new(25.0, 75.0)),
    slot("forward-2", Role::Forward, Anchor::new(75.0, 75.0)),
];

static F132_SLOTS: [FormationSlot; 6] = [
    slot("goalkeeper", Role::Goalkeeper, Anchor::centered(50.0, 8.0)),
    slot("defender-1", Role::Defender, Anchor::new(20.0, 35.0)),
    slot("defender-2", Role::Defender, Anchor::centered(50.0, 30.0)),
    slot("defender-3", Role::Defender, Anchor::new(80.0, 35.0)),
    slot("forward", Role::Forward, Anchor::new(35.0, 75.0)),
    slot("forward-2", Role::Forward, Anchor::new(65.0, 75.0)),
];

static F141_SLOTS: [FormationSlot; 6] = [
    slot("goalkeeper", Role::Goalkeeper, Anchor::centered(50.0, 8.0)),
    slot("defender-1", Role::Defender, Anchor::new(15.0, 35.0)),
    slot("defender-2", Role::Defender, Anchor::new(38.0, 35.0)),
    slot("defender-3", Role::Defender, Anchor::new(62.0, 35.0)),
    slot("defender-4", Role::Defender, Anchor::new(85.0, 35.0)),
    slot("forward", Role::Forward, Anchor::centered(50.0, 75.0)),
];

static F11211_SLOTS: [FormationSlot; 6] = [
    slot("goalkeeper", Role::Goalkeeper, Anchor::centered(50.0, 8.0)),
    slot("defender-1", Role::Defender, Anchor::centered(50.0, 25.0)),
    slot("midfielder-1", Role::Midfielder, Anchor::new(20.0, 45.0)),
    slot("midfielder-2", Role::Midfielder, Anchor::new(80.0, 45.0)),
    slot("midfielder-3", Role::Midfielder, Anchor::centered(50.0, 60.0)),
    slot("forward", Role::Forward, Anchor::centered(50.0, 85.0)),
];

static F1311_SLOTS: [FormationSlot; 6] = [
    slot("goalkeeper", Role::Goalkeeper, Anchor::centered(50.0, 8.0)),
    slot("defender-1", Role::Defender, Anchor::centered(50.0, 25.0)),
    slot("midfielder-1", Role::Midfielder, Anchor::new(20.0, 50.0)),
    slot("midfielder-2", Role::Midfielder, Anchor::centered(50.0, 50.0)),
    slot("midfielder-3", Role::Midfielder, Anchor::new(80.0, 50.0)),
    slot("forward", Role::Forward, Anchor::centered(50.0, 80.0)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Formation {
    #[serde(rename = "1-2-2-1")]
    F1221,
    #[serde(rename = "1-2-1-2")]
    F1212,
    #[serde(rename = "1-2-3")]
    F123,
    #[serde(rename = "1-3-2")]
    F132,
    #[serde(rename = "1-4-1")]
    F141,
    #[serde(rename = "1-1-2-1-1")]
    F11211,
    #[serde(rename = "1-3-1-1")]
    F1311,
}

/// Shape used when a requested name is not in the catalog.
pub const DEFAULT_FORMATION: Formation = Formation::F1221;

impl Default for Formation {
    fn default() -> Self {
        DEFAULT_FORMATION
    }
}

impl Formation {
    pub const ALL: [Formation; 7] = [
        Formation::F1221,
        Formation::F1212,
        Formation::F123,
        Formation::F132,
        Formation::F141,
        Formation::F11211,
        Formation::F1311,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Formation::F1221 => "1-2-2-1",
            Formation::F1212 => "1-2-1-2",
            Formation::F123 => "1-2-3",
            Formation::F132 => "1-3-2",
            Formation::F141 => "1-4-1",
            Formation::F11211 => "1-1-2-1-1",
            Formation::F1311 => "1-3-1-1",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Formation::F1221 => "Balanced: GK + 2 DEF + 2 MID + 1 FWD",
            Formation::F1212 => "GK + 2 DEF + 1 MID + 2 FWD",
            Formation::F123 => "Attacking: GK + 2 DEF + pivot + 2 FWD",
            Formation::F132 => "GK + 3 DEF + 2 FWD",
            Formation::F141 => "Defensive: GK + 4 DEF + 1 FWD",
            Formation::F11211 => "Diamond: GK + libero + 2 wings + playmaker + FWD",
            Formation::F1311 => "Control: GK + 1 DEF + 3 MID + 1 FWD",
        }
    }

    pub fn from_code(code: &str) -> Option<Formation> {
        let code = code.trim();
        Formation::ALL.into_iter().find(|f| f.code() == code)
    }

    /// Catalog lookup that degrades to the default shape for unknown names.
    pub fn resolve(code: &str) -> Formation {
        match Formation::from_code(code) {
            Some(formation) => formation,
            None => {
                log::debug!(
                    "Unknown formation '{}', falling back to {}",
                    code,
                    DEFAULT_FORMATION.code()
                );
                DEFAULT_FORMATION
            }
        }
    }

    pub fn slots(&self) -> &'static [FormationSlot] {
        match self {
            Formation::F1221 => &F1221_SLOTS,
            Formation::F1212 => &F1212_SLOTS,
            Formation::F123 => &F123_SLOTS,
            Formation::F132 => &F132_SLOTS,
            Formation::F141 => &F141_SLOTS,
            Formation::F11211 => &F11211_SLOTS,
            Formation::F1311 => &F1311_SLOTS,
        }
    }

    /// (defenders, midfielders, forwards) outfield counts.
    pub fn outfield_counts(&self) -> (usize, usize, usize) {
        let count = |role: Role| self.slots().iter().filter(|s| s.role == role).count();
        (count(Role::Defender), count(Role::Midfielder), count(Role::Forward))
    }
}

/// Ordered slot templates for a formation name. Unknown names yield the default shape.
pub fn get_formation_config(name: &str) -> Vec<FormationSlot> {
    Formation::resolve(name).slots().to_vec()
}
