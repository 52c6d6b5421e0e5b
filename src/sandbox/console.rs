//! Text commands for driving a [`Sandbox`].

use std::str::FromStr;

use thiserror::Error;

use super::{Sandbox, MAX_SUMMON};

/// Scrollback lines kept; older lines are dropped first
pub const MAX_OUTPUT_LINES: usize = 50;

/// History entries kept; older entries are dropped first
pub const MAX_HISTORY: usize = 100;

const HELP: &[&str] = &[
    "Available commands:",
    "  summon <number> - Summon the specified number of balls",
    "  clear_balls - Remove every ball",
    "  physics_info - Show ball count and hand state",
    "  clear - Clear console output",
    "  help - Show this help message",
    "  history - Show command history",
];

/// A parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Summon(usize),
    ClearBalls,
    PhysicsInfo,
    History,
    Clear,
}

/// Why a command line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Number must be positive")]
    NotPositive,
    #[error("Maximum {0} balls at once")]
    TooMany(usize),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(CommandError::Empty)?;

        match name {
            "help" => Ok(Command::Help),
            "clear_balls" => Ok(Command::ClearBalls),
            "physics_info" => Ok(Command::PhysicsInfo),
            "history" => Ok(Command::History),
            "clear" => Ok(Command::Clear),
            "summon" => {
                let arg = tokens.next().ok_or(CommandError::Usage("summon <number>"))?;
                let count: i64 = arg
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(arg.to_string()))?;
                if count <= 0 {
                    return Err(CommandError::NotPositive);
                }
                if count > MAX_SUMMON as i64 {
                    return Err(CommandError::TooMany(MAX_SUMMON));
                }
                Ok(Command::Summon(count as usize))
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Scrollback, history, and command dispatch for a sandbox
#[derive(Debug, Default)]
pub struct Console {
    output: Vec<String>,
    history: Vec<String>,
    /// Position while browsing history; `None` when editing a fresh line
    cursor: Option<usize>,
    /// Lines printed since creation, including ones trimmed from `output`
    printed: usize,
}

impl Console {
    /// An empty console showing the greeting
    pub fn new() -> Self {
        let mut console = Self::default();
        console.print("Physics Engine Console");
        console.print("Type 'help' for available commands");
        console
    }

    /// Lines printed so far
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Executed command lines, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn print(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
        self.printed += 1;
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(..excess);
        }
    }

    fn remember(&mut self, line: &str) {
        if self.history.last().map(String::as_str) == Some(line) {
            return;
        }
        self.history.push(line.to_string());
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }

    /// Runs a command line against the sandbox and returns the lines it printed
    /// that are still in the scrollback
    pub fn execute(&mut self, sandbox: &mut Sandbox, line: &str) -> &[String] {
        let line = line.trim();
        let printed_before = self.printed;
        if line.is_empty() {
            return &[];
        }

        self.remember(line);
        // Trimming history invalidates any browse position
        self.cursor = None;
        self.print(format!("> {}", line));

        match line.parse::<Command>() {
            Ok(command) => self.run(sandbox, command),
            Err(err @ CommandError::Unknown(_)) => {
                self.print(err.to_string());
                self.print("Type 'help' for available commands");
            }
            Err(err) => self.print(err.to_string()),
        }

        let fresh = (self.printed - printed_before).min(self.output.len());
        &self.output[self.output.len() - fresh..]
    }

    fn run(&mut self, sandbox: &mut Sandbox, command: Command) {
        match command {
            Command::Help => HELP.iter().for_each(|line| self.print(*line)),
            Command::Summon(count) => match sandbox.summon(count) {
                Ok(_) => self.print(format!("Summoned {} balls", count)),
                Err(err) => self.print(format!("Error executing command: {}", err)),
            },
            Command::ClearBalls => {
                sandbox.clear_balls();
                self.print("Cleared all balls");
            }
            Command::PhysicsInfo => {
                let balls = sandbox.world().ball_count();
                let held = if sandbox.held().is_some() { "Yes" } else { "No" };
                self.print("Physics Info:");
                self.print(format!("  Balls: {}", balls));
                self.print(format!("  Held ball: {}", held));
            }
            Command::History => {
                if self.history.is_empty() {
                    self.print("No command history");
                } else {
                    let lines: Vec<String> = self
                        .history
                        .iter()
                        .enumerate()
                        .map(|(i, line)| format!("  {}: {}", i + 1, line))
                        .collect();
                    self.print("Command history:");
                    lines.into_iter().for_each(|line| self.print(line));
                }
            }
            Command::Clear => {
                self.output.clear();
                self.print("Console cleared");
            }
        }
    }

    /// Steps back through history, stopping at the oldest entry
    pub fn history_prev(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        Some(&self.history[index])
    }

    /// Steps forward through history; past the newest entry returns to a fresh line
    pub fn history_next(&mut self) -> Option<&str> {
        let next = self.cursor? + 1;
        if next >= self.history.len() {
            self.cursor = None;
            return None;
        }
        self.cursor = Some(next);
        Some(&self.history[next])
    }
}
