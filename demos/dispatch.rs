/// Example: dispatch a pose command to the controller
///
/// Run with: cargo run --example dispatch
use robot_panel::client::DispatchClient;
use robot_panel::commands::{Command, CommandName};
use robot_panel::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::load(None)?;
    let client = DispatchClient::from_config(&config)?;

    let command = Command::new(CommandName::HomePose);
    tracing::info!(endpoint = %client.endpoint(), command = %command.name(), "dispatching");

    let outcome = client.dispatch(&command).await;

    tracing::info!("outcome: {}", outcome.user_message());
    tracing::info!(
        pending = client.is_pending(),
        "client returned to idle, ready for the next command"
    );

    Ok(())
}
