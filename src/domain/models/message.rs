#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Property;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MessageKind {
    User,
    Assistant,
    System,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub kind: MessageKind,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub engine_label: Option<String>,
    pub properties: Vec<Property>,
}

impl Message {
    pub fn new(id: u64, kind: MessageKind, text: &str) -> Message {
        return Message {
            id,
            kind,
            text: text.to_string(),
            created_at: Utc::now(),
            engine_label: None,
            properties: vec![],
        };
    }

    /// Assistant messages are the only ones carrying an engine label and
    /// property listings.
    pub fn new_assistant(
        id: u64,
        text: &str,
        engine_label: Option<String>,
        properties: Vec<Property>,
    ) -> Message {
        return Message {
            id,
            kind: MessageKind::Assistant,
            text: text.to_string(),
            created_at: Utc::now(),
            engine_label,
            properties,
        };
    }

    pub fn author(&self) -> String {
        match self.kind {
            MessageKind::User => {
                let username = Config::get(ConfigKey::Username);
                if username.is_empty() {
                    return "You".to_string();
                }
                return username;
            }
            MessageKind::Assistant => return "InfinitiView".to_string(),
            MessageKind::System => return "System".to_string(),
            MessageKind::Error => return "Error".to_string(),
        }
    }
}
