use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Recipient of room-wide broadcasts
pub const BROADCAST_RECIPIENT: &str = "Todos";

/// Text of the status message announcing a join
pub const JOINED_TEXT: &str = "entra na sala...";

/// Text of the status message announcing a departure
pub const LEFT_TEXT: &str = "sai da sala...";

/// Kind of chat message. `Status` is reserved for server-generated
/// join/leave announcements and cannot be posted by participants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    Message,
    PrivateMessage,
    Status,
}

/// A chat message. Immutable once stored; the log is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Message {
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(rename = "to")]
    pub recipient: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Server-assigned wall-clock time, HH:MM:SS
    pub time: String,
}

/// Request to post a message. The sender comes from the `User` header.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostMessageRequest {
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl Message {
    pub fn new(sender: String, recipient: String, text: String, kind: MessageKind) -> Self {
        Self {
            sender,
            recipient,
            text,
            kind,
            time: wall_clock(),
        }
    }

    /// Broadcast status message announcing a join or a departure
    pub fn status(name: &str, text: &str) -> Self {
        Self::new(
            name.to_string(),
            BROADCAST_RECIPIENT.to_string(),
            text.to_string(),
            MessageKind::Status,
        )
    }

    /// Whether `user` may see this message. Public and status messages are
    /// visible to everyone; private messages only to sender and recipient.
    pub fn visible_to(&self, user: Option<&str>) -> bool {
        match self.kind {
            MessageKind::Message | MessageKind::Status => true,
            MessageKind::PrivateMessage => {
                user.is_some_and(|u| u == self.sender || u == self.recipient)
            }
        }
    }
}

impl PostMessageRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.to.is_empty() {
            return Err("to must be a non-empty string".to_string());
        }
        if self.text.is_empty() {
            return Err("text must be a non-empty string".to_string());
        }
        if !matches!(self.kind, MessageKind::Message | MessageKind::PrivateMessage) {
            return Err("type must be message or private_message".to_string());
        }
        Ok(())
    }
}

fn wall_clock() -> String {
    Utc::now().format("%H:%M:%S").to_string()
}
