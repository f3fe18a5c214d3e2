use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

use crate::models::Entry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Entry not found.")]
    NotFound,
    #[error("invalid row data: {0}")]
    InvalidData(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// SQLite-backed store for journal entries. Cheap to clone; all clones
/// share one connection pool.
#[derive(Clone)]
pub struct EntryStore {
    pool: SqlitePool,
}

impl EntryStore {
    /// Opens (creating if missing) the database at `database_url` and
    /// ensures the schema exists before returning a usable store.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// In-memory database for tests. The pool is pinned to a single
    /// connection: every SQLite `:memory:` connection is its own database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                note TEXT,
                date TEXT,
                done INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_entries_created_at ON entries (created_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All entries, newest first. Pagination happens client-side.
    pub async fn list(&self) -> StoreResult<Vec<Entry>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, note, date, done, created_at
             FROM entries ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(entry_from_row).collect()
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<Entry> {
        let row = sqlx::query(
            "SELECT id, user_id, title, note, date, done, created_at
             FROM entries WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => entry_from_row(&row),
            None => Err(StoreError::NotFound),
        }
    }

    /// Creates an entry with a fresh id and creation timestamp. The caller
    /// resolves the author id; the store owns title/note normalization.
    pub async fn create(
        &self,
        title: &str,
        note: Option<&str>,
        date: Option<NaiveDate>,
        user_id: &str,
    ) -> StoreResult<Entry> {
        let title = validated_title(title)?;
        let note = normalized_note(note);

        let entry = Entry {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title,
            note,
            date,
            done: false,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO entries (id, user_id, title, note, date, done, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(entry.id.to_string())
        .bind(&entry.user_id)
        .bind(&entry.title)
        .bind(&entry.note)
        .bind(entry.date)
        .bind(entry.done)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Replaces title and note, leaving every other field untouched.
    pub async fn update_fields(
        &self,
        id: Uuid,
        title: &str,
        note: Option<&str>,
    ) -> StoreResult<Entry> {
        let title = validated_title(title)?;
        let note = normalized_note(note);

        let result = sqlx::query("UPDATE entries SET title = ?1, note = ?2 WHERE id = ?3")
            .bind(&title)
            .bind(&note)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.get(id).await
    }

    pub async fn set_done(&self, id: Uuid, done: bool) -> StoreResult<Entry> {
        let result = sqlx::query("UPDATE entries SET done = ?1 WHERE id = ?2")
            .bind(done)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.get(id).await
    }

    /// Permanent removal. There is no soft delete.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

fn validated_title(title: &str) -> StoreResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation("Title is required.".to_string()));
    }
    Ok(trimmed.to_string())
}

fn normalized_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn entry_from_row(row: &SqliteRow) -> StoreResult<Entry> {
    let id_text: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{id_text}` in entries.id")))?;

    let date: Option<NaiveDate> = row.try_get("date")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Entry {
        id,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        note: row.try_get("note")?,
        date,
        done: row.try_get("done")?,
        created_at,
    })
}
