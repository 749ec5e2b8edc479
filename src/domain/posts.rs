//! Post identifiers and listing categories.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::DomainError;

/// Store-assigned post identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PostId(i64);

impl PostId {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::validation(format!(
                "post id must be positive, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PostId {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw
            .parse::<i64>()
            .map_err(|err| DomainError::validation(format!("invalid post id `{raw}`: {err}")))?;
        Self::new(value)
    }
}

/// The two disjoint home-page listings. Every post belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostListing {
    Featured,
    MostRecent,
}

impl PostListing {
    pub fn from_featured(featured: bool) -> Self {
        if featured {
            Self::Featured
        } else {
            Self::MostRecent
        }
    }

    pub fn is_featured(self) -> bool {
        matches!(self, Self::Featured)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::MostRecent => "most_recent",
        }
    }
}
