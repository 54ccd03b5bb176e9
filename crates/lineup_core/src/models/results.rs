//! Match results shown by the results viewer and fed to the assistant context.

use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: u32,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u8,
    pub away_score: u8,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchRecord {
    pub fn involves(&self, team: &str) -> bool {
        self.home_team.eq_ignore_ascii_case(team) || self.away_team.eq_ignore_ascii_case(team)
    }

    /// (goals for, goals against) from `team`'s side, if it played.
    pub fn goals_for(&self, team: &str) -> Option<(u8, u8)> {
        if self.home_team.eq_ignore_ascii_case(team) {
            Some((self.home_score, self.away_score))
        } else if self.away_team.eq_ignore_ascii_case(team) {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }

    pub fn outcome_for(&self, team: &str) -> Option<MatchOutcome> {
        let (scored, conceded) = self.goals_for(team)?;
        Some(match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
        })
    }

    pub fn scoreline(&self) -> String {
        format!("{} {} - {} {}", self.home_team, self.home_score, self.away_score, self.away_team)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TeamRecord {
    pub fn points(&self) -> u32 {
        self.wins * 3 + self.draws
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsBook {
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl ResultsBook {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Newest first; same-day matches keep descending id order.
    pub fn newest_first(&self) -> Vec<&MatchRecord> {
        let mut list: Vec<&MatchRecord> = self.matches.iter().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        list
    }

    pub fn record_for(&self, team: &str) -> TeamRecord {
        let mut record = TeamRecord::default();
        for m in &self.matches {
            let (Some((scored, conceded)), Some(outcome)) = (m.goals_for(team), m.outcome_for(team))
            else {
                continue;
            };
            record.played += 1;
            record.goals_for += scored as u32;
            record.goals_against += conceded as u32;
            match outcome {
                MatchOutcome::Win => record.wins += 1,
                MatchOutcome::Draw => record.draws += 1,
                MatchOutcome::Loss => record.losses += 1,
            }
        }
        record
    }
}
