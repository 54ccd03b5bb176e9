//! Lineup CLI
//!
//! Inspect the squad and catalog, and run lineup command scripts against
//! the editor core from a terminal.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lineup_core::data::{load_results_or_default, load_roster_or_default};
use lineup_core::session::FixedAnswer;
use lineup_core::{
    command_schema_json, load_config_from_env, EditorConfig, Formation, LineupCommand,
    LineupSession, RosterIndex,
};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_TEAM: &str = "Tránsito de Girón";

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "6-a-side lineup editor", long_about = None)]
struct Cli {
    /// Roster JSON file (embedded squad when omitted or unreadable)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the squad by jersey number with roles, captains and head coach
    Roster,

    /// List the formation catalog
    Formations,

    /// Apply a JSON command script to a lineup
    Lineup {
        /// Starting formation (config default when omitted)
        #[arg(long)]
        formation: Option<String>,

        /// JSON file holding an array of commands
        #[arg(long)]
        script: PathBuf,

        /// Accept every confirmation prompt
        #[arg(long, default_value = "false")]
        yes: bool,
    },

    /// Show the candidate picker for a slot of an empty formation
    Candidates {
        #[arg(long)]
        slot: usize,

        #[arg(long, default_value = "1-2-2-1")]
        formation: String,
    },

    /// List match results and the team record
    Results {
        /// Results JSON file (embedded book when omitted or unreadable)
        #[arg(long)]
        results: Option<PathBuf>,

        #[arg(long, default_value = DEFAULT_TEAM)]
        team: String,
    },

    /// Print the JSON schema of lineup commands
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Roster => {
            let roster = load_roster(cli.roster.as_deref());
            print_roster(&roster);
        }

        Commands::Formations => {
            for formation in Formation::ALL {
                let roles: Vec<&str> = formation.slots().iter().map(|s| s.role.label()).collect();
                println!("{:<10} {:<50} [{}]", formation.code(), formation.label(), roles.join(" "));
            }
        }

        Commands::Lineup { formation, script, yes } => {
            let roster = load_roster(cli.roster.as_deref());
            let mut config = load_config_from_env()?;
            if let Some(code) = formation {
                config.default_formation = parse_formation(&code)?.code().to_string();
            }
            let commands = read_script(&script)?;

            let mut session = LineupSession::new(roster, config);
            let mut gate = FixedAnswer(yes);
            for command in commands {
                let name = command.name();
                let result = session.dispatch(command, &mut gate);
                match result.notice {
                    Some(notice) => println!("{:<18} {:?}: {}", name, notice.level, notice.message),
                    None => println!("{:<18} {}", name, if result.changed { "ok" } else { "no change" }),
                }
            }

            println!();
            print_lineup(&session);
        }

        Commands::Candidates { slot, formation } => {
            let roster = load_roster(cli.roster.as_deref());
            let config = EditorConfig {
                default_formation: parse_formation(&formation)?.code().to_string(),
                ..EditorConfig::default()
            };
            let session = LineupSession::new(roster, config);
            let list = session.candidates(slot)?;
            println!("{}", list.title());
            for c in &list.candidates {
                println!(
                    "  {} #{:<3} {:<24} {}",
                    if c.compatible { "*" } else { " " },
                    c.number.as_deref().unwrap_or("-"),
                    c.display_name,
                    c.roles.join(", ")
                );
            }
        }

        Commands::Results { results, team } => {
            let loaded = load_results_or_default(results.as_deref());
            if let Some(err) = &loaded.fallback {
                eprintln!("warning: {} (showing embedded results)", err);
            }
            let book = loaded.value;
            for m in book.newest_first() {
                println!("{}  {}  [{}]", m.date, m.scoreline(), m.status);
                for s in &m.strengths {
                    println!("    + {}", s);
                }
                for i in &m.improvements {
                    println!("    - {}", i);
                }
            }
            let record = book.record_for(&team);
            println!();
            println!(
                "{}: P{} W{} D{} L{}  GF{} GA{}  Pts {}",
                team,
                record.played,
                record.wins,
                record.draws,
                record.losses,
                record.goals_for,
                record.goals_against,
                record.points()
            );
        }

        Commands::Schema => {
            let schema = command_schema_json().map_err(anyhow::Error::msg)?;
            println!("{}", schema);
        }
    }

    Ok(())
}

fn load_roster(path: Option<&Path>) -> RosterIndex {
    let loaded = load_roster_or_default(path);
    if let Some(err) = &loaded.fallback {
        eprintln!("warning: {} (using embedded roster)", err);
    }
    loaded.value
}

fn parse_formation(code: &str) -> Result<Formation> {
    match Formation::from_code(code) {
        Some(formation) => Ok(formation),
        None => bail!("Unknown formation '{}'", code),
    }
}

fn read_script(path: &Path) -> Result<Vec<LineupCommand>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let commands: Vec<LineupCommand> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse script {}", path.display()))?;
    log::debug!("Loaded {} commands from {}", commands.len(), path.display());
    Ok(commands)
}

fn print_roster(roster: &RosterIndex) {
    for (id, player) in roster.players_by_number() {
        let roles: Vec<String> = roster
            .roles_for(id)
            .into_iter()
            .map(|(role, priority)| format!("{} ({})", role.label(), priority.display_name()))
            .collect();
        println!(
            "#{:<3} {:<24} {}",
            player.number.as_deref().unwrap_or("-"),
            player.display_name(),
            roles.join(", ")
        );
    }

    let captains: Vec<String> = roster
        .captains()
        .iter()
        .filter_map(|c| roster.player(&c.id).map(|p| format!("{}. {}", c.order, p.name)))
        .collect();
    if !captains.is_empty() {
        println!();
        println!("Captains: {}", captains.join(", "));
    }
    if let Some((_, coach)) = roster.head_coach() {
        println!("Head coach: {}", coach.name);
    }
}

fn print_lineup(session: &LineupSession) {
    let lineup = session.lineup();
    println!("Formation {}", lineup.formation().code());
    for (i, slot) in lineup.slots().iter().enumerate() {
        let occupant = slot
            .player_id
            .as_ref()
            .and_then(|id| session.roster().player(id))
            .map(|p| p.display_name())
            .unwrap_or_else(|| "-".to_string());
        println!("  {} {:<14} {}", i, slot.class, occupant);
    }
    println!();
    for line in session.report().lines() {
        println!("{}", line);
    }
}
