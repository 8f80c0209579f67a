//! Access levels.
//!
//! Levels are bit values (`Read = 1`, `Write = 2`) that compose into
//! `ReadWrite = 3`. Authorization compares them *numerically*: a grant
//! satisfies a request when `granted >= required`.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The level of access a grant confers or a request needs.
///
/// Zero is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum AccessLevel {
    /// View pages and download files.
    Read = 1,
    /// Edit pages and upload files.
    Write = 2,
    /// `Read | Write`.
    ReadWrite = 3,
}

impl AccessLevel {
    /// All valid levels, in ascending order.
    pub const ALL: [AccessLevel; 3] = [AccessLevel::Read, AccessLevel::Write, AccessLevel::ReadWrite];

    /// The raw numeric value.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Whether a grant at this level satisfies a request for `required`.
    ///
    /// This is an ordinal comparison, not a bitmask test.
    pub const fn satisfies(self, required: AccessLevel) -> bool {
        self.bits() >= required.bits()
    }
}

impl BitOr for AccessLevel {
    type Output = AccessLevel;

    fn bitor(self, rhs: Self) -> Self::Output {
        match self.bits() | rhs.bits() {
            1 => AccessLevel::Read,
            2 => AccessLevel::Write,
            _ => AccessLevel::ReadWrite,
        }
    }
}

impl TryFrom<u8> for AccessLevel {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AccessLevel::Read),
            2 => Ok(AccessLevel::Write),
            3 => Ok(AccessLevel::ReadWrite),
            other => Err(CoreError::InvalidAccessLevel(other.to_string())),
        }
    }
}

impl From<AccessLevel> for u8 {
    fn from(level: AccessLevel) -> Self {
        level.bits()
    }
}

impl FromStr for AccessLevel {
    type Err = CoreError;

    /// Parses the numeric form submitted by the permissions page (`"1"`..`"3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidAccessLevel(s.to_string()))?;
        AccessLevel::try_from(value)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Read => write!(f, "read"),
            AccessLevel::Write => write!(f, "write"),
            AccessLevel::ReadWrite => write!(f, "read+write"),
        }
    }
}
