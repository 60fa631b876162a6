use serde::{Deserialize, Serialize};

use crate::commands::Command;

/// POST body for the controller's `/command` endpoint. Optional
/// fields are omitted entirely when absent so the server can tell
/// "not provided" from "provided as empty".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl CommandRequest {
    /// Pure `Command -> body` transformation; no I/O, no defaults.
    pub fn encode(command: &Command) -> Self {
        Self {
            command: command.name().as_str().to_string(),
            location: command.location().map(str::to_string),
            distance: command.distance(),
        }
    }
}

/// Controller reply on 2xx. `message` wins when both fields are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandReply {
    pub message: Option<String>,
    pub pose: Option<String>,
}

impl CommandReply {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandName;

    #[test]
    fn plain_command_omits_optional_keys() {
        let body = CommandRequest::encode(&Command::new(CommandName::MoveUp));
        let value = serde_json::to_value(&body).unwrap();

        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("command").unwrap(), "move_up");
        assert!(!obj.contains_key("location"));
        assert!(!obj.contains_key("distance"));
    }

    #[test]
    fn movement_with_distance_carries_it() {
        let command = Command::new(CommandName::MoveLeft).with_distance(0.1);
        let value = serde_json::to_value(CommandRequest::encode(&command)).unwrap();

        assert_eq!(value["command"], "move_left");
        assert_eq!(value["distance"], 0.1);
        assert!(!value.as_object().unwrap().contains_key("location"));
    }

    #[test]
    fn location_lookup_carries_location() {
        let command = Command::show_location("kitchen");
        let value = serde_json::to_value(CommandRequest::encode(&command)).unwrap();

        assert_eq!(value["command"], "show_location");
        assert_eq!(value["location"], "kitchen");
        assert!(!value.as_object().unwrap().contains_key("distance"));
    }

    #[test]
    fn reply_prefers_message_over_pose() {
        let reply: CommandReply =
            serde_json::from_str(r#"{"message":"moved","pose":"[0,0,0]"}"#).unwrap();
        assert_eq!(reply.into_message().as_deref(), Some("moved"));
    }

    #[test]
    fn reply_falls_back_to_pose() {
        let reply: CommandReply = serde_json::from_str(r#"{"pose":"[0,0,0]"}"#).unwrap();
        assert_eq!(reply.into_message().as_deref(), Some("[0,0,0]"));
    }

    #[test]
    fn empty_reply_has_no_message() {
        let reply: CommandReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.into_message(), None);
    }
}
