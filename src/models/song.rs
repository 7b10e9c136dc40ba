//! Song record and song identity models

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::parsers::unify;

/// A raw (author, title) pair as decoded from a library export
///
/// No normalization applied; consumed when converted into a [`SongIdentity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Artist name as written in the export
    pub author: String,
    /// Song title as written in the export
    pub title: String,
}

/// Canonical song identity used for equality, hashing and set membership
///
/// Both fields are stored normalized, so two identities built from pairs
/// that differ only in casing, padding or parenthetical annotations compare
/// equal and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SongIdentity {
    author: String,
    title: String,
}

impl SongIdentity {
    pub fn new(author: &str, title: &str) -> Self {
        Self {
            author: unify(author),
            title: unify(title),
        }
    }

    /// Normalized author, used to derive distinct-artist listings
    pub fn author(&self) -> &str {
        &self.author
    }
}

impl From<SongRecord> for SongIdentity {
    fn from(record: SongRecord) -> Self {
        Self::new(&record.author, &record.title)
    }
}

impl fmt::Display for SongIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.author, self.title)
    }
}
