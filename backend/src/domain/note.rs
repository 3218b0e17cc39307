//! Notes owned by accounts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AccountId;

/// Surrogate key of a note row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw database identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A titled text entry belonging to exactly one account.
///
/// Title and content are stored verbatim; escaping belongs to whatever renders
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Surrogate key.
    pub id: NoteId,
    /// Owning account.
    pub owner: AccountId,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Insertion timestamp; listings are ordered by it.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Whether `account` owns this note.
    #[must_use]
    pub fn is_owned_by(&self, account: AccountId) -> bool {
        self.owner == account
    }
}

/// Title and body supplied when adding a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    /// Short heading.
    pub title: String,
    /// Body text.
    pub content: String,
}

impl NoteDraft {
    /// Build a draft from raw form values.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Values needed to insert a note; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    /// Owning account.
    pub owner: AccountId,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}
