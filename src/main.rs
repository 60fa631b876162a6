use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use robot_panel::client::DispatchClient;
use robot_panel::commands::{parse_distance, Command, CommandName};
use robot_panel::config::Config;
use robot_panel::utils;

#[derive(Parser)]
#[command(name = "panel", version, about = "Robot Control Panel (command dispatch client)")]
struct PanelCli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Controller endpoint override
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Dispatch deadline override in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Print the raw outcome as JSON instead of the user message
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: PanelCommand,
}

#[derive(Subcommand)]
enum PanelCommand {
    /// Move the arm one step in a direction
    Move {
        direction: Direction,
        /// Step distance in meters; non-numeric input is ignored
        #[arg(long)]
        distance: Option<String>,
    },
    /// Send the arm to a named pose, or print the current one
    Pose { pose: PoseKind },
    /// Actuate the gripper
    Gripper { action: GripperAction },
    /// Point the arm at a location by name
    Locate { location: String },
    /// Shut the robot down
    Shutdown,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, ValueEnum)]
enum PoseKind {
    Print,
    Home,
    Globe,
    Ready,
    Sleep,
}

#[derive(Clone, Copy, ValueEnum)]
enum GripperAction {
    Release,
    Grasp,
}

fn build_command(cli: &PanelCommand) -> Command {
    match cli {
        PanelCommand::Move { direction, distance } => {
            let name = match direction {
                Direction::Up => CommandName::MoveUp,
                Direction::Down => CommandName::MoveDown,
                Direction::Left => CommandName::MoveLeft,
                Direction::Right => CommandName::MoveRight,
            };
            let mut command = Command::new(name);
            if let Some(raw) = distance {
                match parse_distance(raw) {
                    Some(step) => command = command.with_distance(step),
                    None => warn!(input = %raw, "ignoring non-numeric distance"),
                }
            }
            command
        }
        PanelCommand::Pose { pose } => Command::new(match pose {
            PoseKind::Print => CommandName::PrintPose,
            PoseKind::Home => CommandName::HomePose,
            PoseKind::Globe => CommandName::GlobePose,
            PoseKind::Ready => CommandName::ReadyPose,
            PoseKind::Sleep => CommandName::SleepPose,
        }),
        PanelCommand::Gripper { action } => Command::new(match action {
            GripperAction::Release => CommandName::ReleaseGripper,
            GripperAction::Grasp => CommandName::GraspGripper,
        }),
        PanelCommand::Locate { location } => Command::show_location(location.clone()),
        PanelCommand::Shutdown => Command::new(CommandName::Shutdown),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    utils::logging::init();

    let args = PanelCli::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.default_timeout_ms = timeout_ms;
    }

    let command = build_command(&args.command);
    info!(endpoint = %config.endpoint, command = %command.name(), "dispatching");

    let client = DispatchClient::from_config(&config)?;
    let outcome = client.dispatch(&command).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.user_message());
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
