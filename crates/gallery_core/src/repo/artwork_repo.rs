//! Artwork record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert, list (newest first) and delete rows of the `artworks` table.
//!
//! # Invariants
//! - `list_artworks` is ordered by `id DESC`, which equals creation order
//!   reversed because ids are never reused.
//! - `delete_artwork` on a missing id succeeds without touching anything.

use crate::db::DbError;
use crate::model::artwork::{Artwork, ArtworkId, ArtworkValidationError, NewArtwork};
use log::{debug, info};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ARTWORK_SELECT_SQL: &str = "SELECT id, username, image_url FROM artworks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Record-store error for artwork persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ArtworkValidationError),
    Db(DbError),
    InvalidData(String),
    /// Failure reported by a non-SQLite store implementation.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted artwork data: {message}"),
            Self::Backend(message) => write!(f, "record store error: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Backend(_) => None,
        }
    }
}

impl From<ArtworkValidationError> for RepoError {
    fn from(value: ArtworkValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record-store interface for the `artworks` table.
pub trait ArtworkRepository {
    /// Inserts one row and returns it with the store-assigned id.
    fn insert_artwork(&self, artwork: &NewArtwork) -> RepoResult<Artwork>;
    /// Returns every row ordered by id, newest first.
    fn list_artworks(&self) -> RepoResult<Vec<Artwork>>;
    /// Removes the row with `id`.
    fn delete_artwork(&self, id: ArtworkId) -> RepoResult<()>;
}

/// SQLite-backed artwork repository.
pub struct SqliteArtworkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArtworkRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ArtworkRepository for SqliteArtworkRepository<'_> {
    fn insert_artwork(&self, artwork: &NewArtwork) -> RepoResult<Artwork> {
        artwork.validate()?;

        self.conn.execute(
            "INSERT INTO artworks (username, image_url) VALUES (?1, ?2);",
            params![artwork.owner_handle, artwork.image_reference],
        )?;
        let id = self.conn.last_insert_rowid();

        info!("event=artwork_insert module=repo status=ok id={id}");
        Ok(artwork.clone().into_artwork(id))
    }

    fn list_artworks(&self) -> RepoResult<Vec<Artwork>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTWORK_SELECT_SQL} ORDER BY id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut artworks = Vec::new();

        while let Some(row) = rows.next()? {
            artworks.push(parse_artwork_row(row)?);
        }

        debug!(
            "event=artwork_list module=repo status=ok count={}",
            artworks.len()
        );
        Ok(artworks)
    }

    fn delete_artwork(&self, id: ArtworkId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM artworks WHERE id = ?1;", params![id])?;

        info!("event=artwork_delete module=repo status=ok id={id} rows={changed}");
        Ok(())
    }
}

fn parse_artwork_row(row: &Row<'_>) -> RepoResult<Artwork> {
    let artwork = Artwork {
        id: row.get("id")?,
        owner_handle: row.get("username")?,
        image_reference: row.get("image_url")?,
    };
    artwork.validate().map_err(|err| {
        RepoError::InvalidData(format!("artworks row {} failed validation: {err}", artwork.id))
    })?;
    Ok(artwork)
}
