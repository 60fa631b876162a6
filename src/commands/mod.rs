pub mod wire;

pub use wire::{CommandReply, CommandRequest};

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// The closed set of commands the controller understands. Anything
/// outside this set is a caller error, caught before a [`Command`]
/// can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PrintPose,
    HomePose,
    GlobePose,
    ReadyPose,
    ReleaseGripper,
    GraspGripper,
    SleepPose,
    ShowLocation,
    Shutdown,
}

impl CommandName {
    pub const ALL: [CommandName; 13] = [
        CommandName::MoveUp,
        CommandName::MoveDown,
        CommandName::MoveLeft,
        CommandName::MoveRight,
        CommandName::PrintPose,
        CommandName::HomePose,
        CommandName::GlobePose,
        CommandName::ReadyPose,
        CommandName::ReleaseGripper,
        CommandName::GraspGripper,
        CommandName::SleepPose,
        CommandName::ShowLocation,
        CommandName::Shutdown,
    ];

    /// Wire identifier for this command.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::MoveUp => "move_up",
            CommandName::MoveDown => "move_down",
            CommandName::MoveLeft => "move_left",
            CommandName::MoveRight => "move_right",
            CommandName::PrintPose => "print_pose",
            CommandName::HomePose => "home_pose",
            CommandName::GlobePose => "globe_pose",
            CommandName::ReadyPose => "ready_pose",
            CommandName::ReleaseGripper => "release_gripper",
            CommandName::GraspGripper => "grasp_gripper",
            CommandName::SleepPose => "sleep_pose",
            CommandName::ShowLocation => "show_location",
            CommandName::Shutdown => "shutdown",
        }
    }

    /// Movement commands may carry a step distance.
    pub fn accepts_distance(&self) -> bool {
        matches!(
            self,
            CommandName::MoveUp
                | CommandName::MoveDown
                | CommandName::MoveLeft
                | CommandName::MoveRight
        )
    }

    /// `show_location` is the only command with a required parameter.
    pub fn requires_location(&self) -> bool {
        matches!(self, CommandName::ShowLocation)
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for name in CommandName::ALL {
            if name.as_str() == s {
                return Ok(name);
            }
        }
        bail!("unrecognized command '{}'", s)
    }
}

/// A logical command, independent of wire format. The optional fields
/// stay unset unless they are relevant to the command, so the encoder
/// can render absence as key omission.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: CommandName,
    location: Option<String>,
    distance: Option<f64>,
}

impl Command {
    pub fn new(name: CommandName) -> Self {
        Self {
            name,
            location: None,
            distance: None,
        }
    }

    /// Location lookup, with its required parameter.
    pub fn show_location(location: impl Into<String>) -> Self {
        Self {
            name: CommandName::ShowLocation,
            location: Some(location.into()),
            distance: None,
        }
    }

    /// Attach a step distance. Dropped for commands that do not move.
    pub fn with_distance(mut self, distance: f64) -> Self {
        if self.name.accepts_distance() {
            self.distance = Some(distance);
        }
        self
    }

    pub fn name(&self) -> CommandName {
        self.name
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    /// Pre-flight check; returns the problem as text when the command
    /// must not reach the network.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.requires_location() {
            match self.location.as_deref() {
                Some(location) if !location.trim().is_empty() => {}
                _ => return Err("Please enter a location.".to_string()),
            }
        }
        Ok(())
    }
}

/// Lenient distance parsing: anything that is not a finite number
/// means "no distance provided".
pub fn parse_distance(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|d| d.is_finite())
}
