use serde::Serialize;

/// Terminal, classified result of a single dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// 2xx response carrying a `message` or `pose` field.
    Success { message: String },
    /// Deadline elapsed before the call settled.
    Timeout,
    /// Transport-level failure before any response was available.
    NetworkFailure { detail: String },
    /// Response received but the status was not 2xx.
    ServerFailure { status_text: String },
    /// Anything else, e.g. a malformed response body.
    ApplicationFailure { detail: String },
    /// Missing required parameter, caught before any network activity.
    ValidationFailure { detail: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Human-readable text for the presentation layer to render.
    pub fn user_message(&self) -> String {
        match self {
            Outcome::Success { message } => message.clone(),
            Outcome::Timeout => "Request timeout. The robot may not be available.".to_string(),
            Outcome::NetworkFailure { .. } => {
                "Network error. Please check your connection.".to_string()
            }
            Outcome::ServerFailure { status_text } => format!("Server error: {}", status_text),
            Outcome::ApplicationFailure { detail } => format!("Error: {}", detail),
            Outcome::ValidationFailure { detail } => detail.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_renders_distinct_text() {
        let outcomes = [
            Outcome::Success {
                message: "moved up".into(),
            },
            Outcome::Timeout,
            Outcome::NetworkFailure {
                detail: "connection refused".into(),
            },
            Outcome::ServerFailure {
                status_text: "Service Unavailable".into(),
            },
            Outcome::ApplicationFailure {
                detail: "malformed response body".into(),
            },
            Outcome::ValidationFailure {
                detail: "Please enter a location.".into(),
            },
        ];

        let messages: Vec<String> = outcomes.iter().map(Outcome::user_message).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn timeout_text_matches_panel_copy() {
        assert_eq!(
            Outcome::Timeout.user_message(),
            "Request timeout. The robot may not be available."
        );
    }

    #[test]
    fn server_failure_carries_status_text() {
        let outcome = Outcome::ServerFailure {
            status_text: "Service Unavailable".into(),
        };
        assert_eq!(outcome.user_message(), "Server error: Service Unavailable");
    }

    #[test]
    fn serializes_tagged_by_kind() {
        let value = serde_json::to_value(Outcome::Timeout).unwrap();
        assert_eq!(value["kind"], "timeout");

        let value = serde_json::to_value(Outcome::Success {
            message: "ok".into(),
        })
        .unwrap();
        assert_eq!(value["kind"], "success");
        assert_eq!(value["message"], "ok");
    }
}
