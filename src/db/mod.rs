use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, FromRow, Pool, Sqlite};

use crate::models::{Message, MessageKind, Participant};

pub type DbPool = Pool<Sqlite>;

#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

#[derive(FromRow)]
struct ParticipantRow {
    name: String,
    last_status: i64,
}

#[derive(FromRow)]
struct MessageRow {
    sender: String,
    recipient: String,
    text: String,
    kind: String,
    time: String,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        // Create database file if it doesn't exist
        let db_path = database_url.trim_start_matches("sqlite://");
        let in_memory = db_path.contains(":memory:");
        if !in_memory {
            if let Some(parent) = std::path::Path::new(db_path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            if !std::path::Path::new(db_path).exists() {
                std::fs::File::create(db_path)?;
            }
        }

        // Each pooled connection to :memory: opens its own empty database,
        // so in-memory URLs get a single shared connection.
        let max_connections = if in_memory { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    // ==================== Participants ====================

    /// Insert a participant. Returns false when the name is already taken.
    pub async fn insert_participant(
        &self,
        name: &str,
        last_status: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("INSERT INTO participants (name, last_status) VALUES (?, ?)")
            .bind(name)
            .bind(last_status)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Get a participant by name
    pub async fn find_participant(&self, name: &str) -> Result<Option<Participant>, sqlx::Error> {
        let row: Option<ParticipantRow> =
            sqlx::query_as("SELECT name, last_status FROM participants WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|row| Participant {
            name: row.name,
            last_status: row.last_status,
        }))
    }

    /// List all participants
    pub async fn list_participants(&self) -> Result<Vec<Participant>, sqlx::Error> {
        let rows: Vec<ParticipantRow> =
            sqlx::query_as("SELECT name, last_status FROM participants ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|row| Participant {
                name: row.name,
                last_status: row.last_status,
            })
            .collect())
    }

    /// Refresh a participant's activity timestamp. Returns false when the
    /// participant does not exist.
    pub async fn touch_participant(
        &self,
        name: &str,
        last_status: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE participants SET last_status = ? WHERE name = ?")
            .bind(last_status)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a participant only while it is still stale. Conditional on the
    /// stored timestamp so a heartbeat that lands mid-sweep wins.
    pub async fn remove_stale_participant(
        &self,
        name: &str,
        cutoff: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM participants WHERE name = ? AND last_status < ?")
            .bind(name)
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== Messages ====================

    /// Append a message to the log
    pub async fn insert_message(&self, message: &Message) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO messages (sender, recipient, text, kind, time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&message.sender)
        .bind(&message.recipient)
        .bind(&message.text)
        .bind(message.kind.to_string())
        .bind(&message.time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List all messages in insertion order
    pub async fn list_messages(&self) -> Result<Vec<Message>, sqlx::Error> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT sender, recipient, text, kind, time FROM messages ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_message).collect()
    }

    /// Helper to convert row to Message
    fn row_to_message(row: MessageRow) -> Result<Message, sqlx::Error> {
        let kind = row
            .kind
            .parse::<MessageKind>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Message {
            sender: row.sender,
            recipient: row.recipient,
            text: row.text,
            kind,
            time: row.time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_connection() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let result = sqlx::query("SELECT 1").fetch_one(db.pool()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.run_migrations().await.unwrap();

        assert!(db.insert_participant("ana", 1).await.unwrap());
        assert!(!db.insert_participant("ana", 2).await.unwrap());

        let stored = db.find_participant("ana").await.unwrap().unwrap();
        assert_eq!(stored.last_status, 1);
    }
}
