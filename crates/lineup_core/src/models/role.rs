//! Role categories and priority tiers
//!
//! `Role` is attached to every catalog slot at definition time. String tag
//! inference (`Role::infer_from_class`) only runs at the data boundary, when a
//! saved field layout is loaded.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "porteros", alias = "portero")]
    Goalkeeper,
    #[serde(alias = "defensas", alias = "defensa")]
    Defender,
    #[serde(alias = "medio", alias = "mediocampista")]
    Midfielder,
    #[serde(alias = "delanteros", alias = "delantero")]
    Forward,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Goalkeeper, Role::Defender, Role::Midfielder, Role::Forward];

    /// Roster key used by the club's data files.
    pub fn key(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "porteros",
            Role::Defender => "defensas",
            Role::Midfielder => "medio",
            Role::Forward => "delanteros",
        }
    }

    /// Short badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "POR",
            Role::Defender => "DEF",
            Role::Midfielder => "MED",
            Role::Forward => "DEL",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "Portero",
            Role::Defender => "Defensa",
            Role::Midfielder => "Mediocampista",
            Role::Forward => "Delantero",
        }
    }

    /// Parse a roster position key (Spanish data keys or English names).
    pub fn from_key(key: &str) -> Option<Role> {
        match key.trim().to_lowercase().as_str() {
            "porteros" | "portero" | "goalkeeper" | "goalkeepers" | "gk" => Some(Role::Goalkeeper),
            "defensas" | "defensa" | "defender" | "defenders" | "df" => Some(Role::Defender),
            "medio" | "mediocampista" | "midfielder" | "midfielders" | "mf" => {
                Some(Role::Midfielder)
            }
            "delanteros" | "delantero" | "forward" | "forwards" | "fw" => Some(Role::Forward),
            _ => None,
        }
    }

    /// Infer a role from a slot class tag such as `defender-2`.
    ///
    /// Checked in goalkeeper, defender, midfielder, forward order. Returns `None`
    /// for tags that match none of them.
    pub fn infer_from_class(class: &str) -> Option<Role> {
        let class = class.to_lowercase();
        if class.contains("goal") {
            Some(Role::Goalkeeper)
        } else if class.contains("def") {
            Some(Role::Defender)
        } else if class.contains("mid") {
            Some(Role::Midfielder)
        } else if class.contains("for") {
            Some(Role::Forward)
        } else {
            None
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// How well a player suits a role. Orders `High < Medium < Low < Unranked`
/// so an ascending sort puts the best candidates first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    /// Any tag the data source uses that is not one of the three tiers.
    Unranked,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
            Priority::Unranked => 99,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high-priority",
            Priority::Medium => "medium-priority",
            Priority::Low => "low-priority",
            Priority::Unranked => "unranked",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::High => "Alta",
            Priority::Medium => "Media",
            Priority::Low => "Baja",
            Priority::Unranked => "Normal",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "high-priority" | "high" | "alta" => Priority::High,
            "medium-priority" | "medium" | "media" => Priority::Medium,
            "low-priority" | "low" | "baja" => Priority::Low,
            _ => Priority::Unranked,
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_class() {
        assert_eq!(Role::infer_from_class("goalkeeper"), Some(Role::Goalkeeper));
        assert_eq!(Role::infer_from_class("defender-2"), Some(Role::Defender));
        assert_eq!(Role::infer_from_class("midfielder-3"), Some(Role::Midfielder));
        assert_eq!(Role::infer_from_class("forward-2"), Some(Role::Forward));
        assert_eq!(Role::infer_from_class("libero"), None);
        assert_eq!(Role::infer_from_class(""), None);
    }

    #[test]
    fn test_from_key_accepts_both_vocabularies() {
        assert_eq!(Role::from_key("porteros"), Some(Role::Goalkeeper));
        assert_eq!(Role::from_key("Defender"), Some(Role::Defender));
        assert_eq!(Role::from_key("medio"), Some(Role::Midfielder));
        assert_eq!(Role::from_key("delanteros"), Some(Role::Forward));
        assert_eq!(Role::from_key("suplentes"), None);
    }

    #[test]
    fn test_priority_parsing_and_order() {
        let parsed: Priority = serde_json::from_str("\"high-priority\"").unwrap();
        assert_eq!(parsed, Priority::High);
        let parsed: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Priority::Low);
        let parsed: Priority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(parsed, Priority::Unranked);

        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
        assert!(Priority::Low < Priority::Unranked);
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium-priority\"");
    }

    #[test]
    fn test_role_serde_aliases() {
        let role: Role = serde_json::from_str("\"defensas\"").unwrap();
        assert_eq!(role, Role::Defender);
        assert_eq!(serde_json::to_string(&Role::Forward).unwrap(), "\"forward\"");
    }
}
