// Console commands for the headless client and the text views they print.

use crate::domain::avionics::{SystemToggle, UnknownSystem};
use crate::domain::catalog::SHOP_ITEMS;
use crate::domain::mission::MISSION_DISTANCES_KM;
use crate::domain::ports::LeaderboardEntry;
use crate::domain::state::RemotePlayer;
use crate::use_cases::GameSession;
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Missions,
    Fly(u32),
    Throttle(f32),
    Stick { x: f32, y: f32 },
    Release,
    Rudder(f32),
    Toggle(SystemToggle),
    Announce(String),
    Shop,
    Buy(String),
    Redeem(String),
    Continue,
    Abort,
    Status,
    Players,
    Leaderboard,
    Save,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    UnknownSystem(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Empty => f.write_str("empty command"),
            CommandError::Unknown(cmd) => write!(f, "unknown command `{cmd}` (try `help`)"),
            CommandError::MissingArgument(what) => write!(f, "missing argument: {what}"),
            CommandError::InvalidNumber(raw) => write!(f, "not a number: {raw}"),
            CommandError::UnknownSystem(name) => write!(f, "unknown system `{name}`"),
        }
    }
}

impl From<UnknownSystem> for CommandError {
    fn from(err: UnknownSystem) -> Self {
        CommandError::UnknownSystem(err.0)
    }
}

fn number<T: FromStr>(raw: Option<&str>, what: &'static str) -> Result<T, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument(what))?;
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn rest(line: &str, what: &'static str) -> Result<String, CommandError> {
    let text = line
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(CommandError::MissingArgument(what));
    }
    Ok(text.to_string())
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "missions" => Command::Missions,
            "fly" => Command::Fly(number(words.next(), "distance in km")?),
            "throttle" => Command::Throttle(number(words.next(), "throttle 0..1")?),
            "stick" => Command::Stick {
                x: number(words.next(), "stick x")?,
                y: number(words.next(), "stick y")?,
            },
            "release" => Command::Release,
            "rudder" => Command::Rudder(number(words.next(), "rudder -1..1")?),
            "toggle" => {
                let name = words.next().ok_or(CommandError::MissingArgument("system"))?;
                Command::Toggle(name.parse()?)
            }
            "announce" => Command::Announce(rest(line, "announcement text")?),
            "shop" => Command::Shop,
            "buy" => Command::Buy(rest(line, "item id")?),
            "redeem" => Command::Redeem(rest(line, "code")?),
            "continue" => Command::Continue,
            "abort" => Command::Abort,
            "status" => Command::Status,
            "players" => Command::Players,
            "leaderboard" => Command::Leaderboard,
            "save" => Command::Save,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
commands:
  start                  leave the splash screen
  missions               list mission distances
  fly <km>               accept a mission
  throttle <0..1>        set throttle
  stick <x> <y>          hold the stick (y < 0 pulls the nose up)
  release                centre the stick
  rudder <-1..1>         set rudder
  toggle <system>        flip an avionics switch
  announce <text>        passenger announcement
  shop | buy <item>      browse or buy upgrades
  redeem <code>          redeem a code
  continue | abort       leave the current mission
  status | players | leaderboard
  save | quit";

pub fn render_status(session: &GameSession, relay_status: &str) -> String {
    let aircraft = session.aircraft();
    let progression = session.progression();
    let mut out = String::new();

    let _ = writeln!(out, "state: {}  relay: {relay_status}", session.state());
    let _ = writeln!(
        out,
        "speed: {} km/h  altitude: {} ft  grounded: {}",
        aircraft.display_speed(),
        session.display_altitude(),
        aircraft.grounded
    );
    if let Some(mission) = session.mission() {
        let distance = session
            .progress()
            .map(|p| p.display_distance.to_string())
            .unwrap_or_else(|| "?".to_string());
        let _ = writeln!(
            out,
            "mission: {} km to {}  remaining: {distance}  reward: {}",
            mission.distance_km, mission.destination_name, mission.reward
        );
    }
    let _ = write!(
        out,
        "money: {}  missions: {}  tag: {}",
        progression.money, progression.missions_completed, progression.name_tag
    );
    if let Some(text) = session.announcement() {
        let _ = write!(out, "\nannouncement: {text}");
    }
    if let Some(text) = session.notice() {
        let _ = write!(out, "\n>> {text}");
    }
    out
}

pub fn render_missions() -> String {
    let routes: Vec<String> = MISSION_DISTANCES_KM
        .iter()
        .map(|km| format!("{km} km ({} coins)", u64::from(*km) * 100))
        .collect();
    format!("routes: {}", routes.join(", "))
}

pub fn render_shop(session: &GameSession) -> String {
    let progression = session.progression();
    let mut out = format!("wallet: {}", progression.money);
    for item in &SHOP_ITEMS {
        let owned = if progression.owns(item.id) { "owned" } else { "" };
        let _ = write!(
            out,
            "\n  {:<15} {:<18} {:>6}  {}",
            item.id, item.name, item.price, owned
        );
    }
    out
}

pub fn render_players(players: &[RemotePlayer]) -> String {
    if players.is_empty() {
        return "no other pilots online".to_string();
    }
    players
        .iter()
        .map(|p| {
            format!(
                "  {} at ({:.0}, {:.0}, {:.0})",
                p.display_name(),
                p.position.x,
                p.position.y,
                p.position.z
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(rank, e)| format!("  {:>2}. {:<16} {}", rank + 1, e.username, e.score))
        .collect::<Vec<_>>()
        .join("\n")
}
