use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Roster identity of a player. Ids are strings in the club data ("7", "12").
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, when it is one. Used for roster key ordering.
    pub fn numeric(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        PlayerId(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        PlayerId(value)
    }
}

/// Jersey number sort key for players without a parseable number.
pub const UNNUMBERED_SORT_KEY: u32 = 99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Jersey number as written in the data ("7", "99"); numbers are also accepted.
    #[serde(default, deserialize_with = "deserialize_jersey", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, number: Option<&str>, veteran: bool) -> Self {
        Self {
            name: name.into(),
            number: number.map(str::to_string),
            veteran,
            rating: None,
            strengths: Vec::new(),
            improvements: Vec::new(),
        }
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn jersey_number(&self) -> Option<u32> {
        self.number.as_deref().and_then(|n| n.trim().parse().ok())
    }

    /// Sort key for candidate lists: unnumbered players sort as 99.
    pub fn number_sort_key(&self) -> u32 {
        self.jersey_number().unwrap_or(UNNUMBERED_SORT_KEY)
    }

    /// Name with the veteran star, as shown in selection lists.
    pub fn display_name(&self) -> String {
        if self.veteran {
            format!("{} ★", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JerseyRepr {
    Text(String),
    Number(u32),
}

fn deserialize_jersey<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<JerseyRepr> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(JerseyRepr::Text(s)) if s.trim().is_empty() => None,
        Some(JerseyRepr::Text(s)) => Some(s.trim().to_string()),
        Some(JerseyRepr::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_deserialize_minimal() {
        let player: Player =
            serde_json::from_str(r#"{ "name": "Harold", "number": "9", "veteran": false }"#)
                .unwrap();
        assert_eq!(player.name, "Harold");
        assert_eq!(player.jersey_number(), Some(9));
        assert!(!player.veteran);
        assert!(player.strengths.is_empty());
    }

    #[test]
    fn test_jersey_accepts_number_and_blank() {
        let player: Player = serde_json::from_str(r#"{ "name": "A", "number": 4 }"#).unwrap();
        assert_eq!(player.number.as_deref(), Some("4"));

        let player: Player = serde_json::from_str(r#"{ "name": "B", "number": "" }"#).unwrap();
        assert_eq!(player.number, None);
        assert_eq!(player.number_sort_key(), UNNUMBERED_SORT_KEY);

        let player: Player = serde_json::from_str(r#"{ "name": "C" }"#).unwrap();
        assert_eq!(player.number, None);
    }

    #[test]
    fn test_display_name_marks_veterans() {
        let vet = Player::new("Gregorio", Some("17"), true);
        assert_eq!(vet.display_name(), "Gregorio ★");
        let rookie = Player::new("Javier", Some("27"), false);
        assert_eq!(rookie.display_name(), "Javier");
    }

    #[test]
    fn test_player_id_numeric() {
        assert_eq!(PlayerId::from("12").numeric(), Some(12));
        assert_eq!(PlayerId::from("guest").numeric(), None);
        assert_eq!(serde_json::to_string(&PlayerId::from("7")).unwrap(), "\"7\"");
    }
}
