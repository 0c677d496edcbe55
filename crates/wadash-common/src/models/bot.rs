//! Spam-bot configurations and their action logs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotsResponse {
    #[serde(default)]
    pub bots: Vec<BotConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logs: Vec<BotLog>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One moderation action a bot took against a participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotLog {
    pub phone_or_name: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BotLog {
    pub fn action_or_default(&self) -> &str {
        self.action.as_deref().filter(|a| !a.is_empty()).unwrap_or("No action")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_action_fallback() {
        let resp: BotsResponse = serde_json::from_value(serde_json::json!({
            "bots": [{
                "id": 1,
                "name": "strict",
                "logs": [
                    { "phone_or_name": "+91999", "action": "removed" },
                    { "phone_or_name": "Ravi" },
                    { "phone_or_name": "Meera", "action": "" }
                ]
            }]
        }))
        .unwrap();
        let logs = &resp.bots[0].logs;
        assert_eq!(logs[0].action_or_default(), "removed");
        assert_eq!(logs[1].action_or_default(), "No action");
        assert_eq!(logs[2].action_or_default(), "No action");
    }
}
