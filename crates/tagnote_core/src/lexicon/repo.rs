//! Lexicon persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the load/save boundary the classification core consumes.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Tag::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `save` replaces the whole persisted set in a single transaction.

use crate::db::DbError;
use crate::model::tag::{Tag, TagState, TagValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type LexiconResult<T> = Result<T, LexiconError>;

/// Lexicon persistence and validation error.
#[derive(Debug)]
pub enum LexiconError {
    Validation(TagValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for LexiconError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted tag data: {message}"),
        }
    }
}

impl Error for LexiconError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TagValidationError> for LexiconError {
    fn from(value: TagValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for LexiconError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for LexiconError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage boundary for the user's persisted tag set.
///
/// Implementations live behind this trait so the engine can run against
/// SQLite, an in-memory stub, or a failure-injecting test double.
pub trait LexiconPersistence: Send {
    /// Loads the full persisted tag set. Order is not significant.
    fn load(&self) -> LexiconResult<Vec<Tag>>;
    /// Replaces the full persisted tag set atomically.
    fn save(&mut self, tags: &[Tag]) -> LexiconResult<()>;
}

/// SQLite-backed lexicon persistence.
pub struct SqliteLexiconRepository {
    conn: Connection,
}

impl SqliteLexiconRepository {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl LexiconPersistence for SqliteLexiconRepository {
    fn load(&self) -> LexiconResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, usage_count, last_used_at
             FROM tags
             ORDER BY name ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }

        Ok(tags)
    }

    fn save(&mut self, tags: &[Tag]) -> LexiconResult<()> {
        for tag in tags {
            tag.validate()?;
        }

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM tags;", [])?;
        for tag in tags {
            tx.execute(
                "INSERT INTO tags (uuid, name, usage_count, last_used_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    tag.uuid.to_string(),
                    tag.name.as_str(),
                    tag.usage_count,
                    tag.last_used_at,
                ],
            )?;
        }
        tx.commit()?;

        Ok(())
    }
}

fn parse_tag_row(row: &Row<'_>) -> LexiconResult<Tag> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        LexiconError::InvalidData(format!("invalid uuid value `{uuid_text}` in tags.uuid"))
    })?;

    let usage_count: i64 = row.get("usage_count")?;
    let usage_count = u32::try_from(usage_count).map_err(|_| {
        LexiconError::InvalidData(format!(
            "invalid usage_count value `{usage_count}` in tags.usage_count"
        ))
    })?;

    let mut tag = Tag::with_id(uuid, row.get::<_, String>("name")?);
    tag.state = TagState::Adopted;
    tag.usage_count = usage_count;
    tag.last_used_at = row.get("last_used_at")?;
    tag.validate()?;

    Ok(tag)
}
