use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use argon2::password_hash::PasswordHashString;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::identity::UserId;
use crate::username_string::UsernameString;

macro_rules! resource_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                i64::from_str(s).map($name)
            }
        }
    };
}

resource_id!(NotebookId);
resource_id!(NoteId);
resource_id!(ImageId);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: UsernameString,
    pub password_hash: PasswordHashString,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notebook {
    pub id: NotebookId,
    pub owner: UserId,
    pub name: String,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub owner: UserId,
    pub notebook: NotebookId,
    pub content: String,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoteImage {
    pub id: ImageId,
    pub note: NoteId,
    pub filename: String,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoteWithImages {
    pub note: Note,
    pub images: Vec<NoteImage>,
}

/// Inclusive creation time bounds for note listings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TimeRange {
    pub from: Option<OffsetDateTime>,
    pub to: Option<OffsetDateTime>,
}

impl TimeRange {
    pub fn contains(&self, at: OffsetDateTime) -> bool {
        self.from.is_none_or(|from| at >= from)
            && self.to.is_none_or(|to| at <= to)
    }
}
