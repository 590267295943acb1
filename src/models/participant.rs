use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A participant currently in the room
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub name: String,
    /// Epoch milliseconds of the last status ping
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

/// Request to register a participant
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
}

impl RegisterRequest {
    /// The trimmed name, or an error when nothing is left after trimming
    pub fn validated_name(&self) -> Result<String, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name must be a non-empty string".to_string());
        }
        Ok(name.to_string())
    }
}
