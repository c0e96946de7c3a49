//! Domain models for the roster conversion pipeline.
//!
//! - [`Column`] - Named roster columns and their positions in the export
//! - [`RawRow`] - One data line of the export, as read
//! - [`MemberRecord`] - A normalized roster member
//! - [`SqlValue`] - A typed value ready to be written as a SQL literal

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Column Layout
// =============================================================================

/// Number of columns in a roster export row.
pub const COLUMN_COUNT: usize = 25;

/// Roster columns read by the converter.
///
/// Layout of the "Main Sheet" export (0-based):
/// ```text
///  0 status        8 credits      15 team          21 google
///  1 nickname      9 legal        16 second team   22 github
///  2 -            10 reddit       17 VA            23 steamworks
///  3 -            11 -            18 NDA           24 steam
///  4 date added   12 email        19 CLA
///  5 date removed 13 time zone    20 scenefusion
///  6 -            14 team lead
///  7 removal
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Status,
    Nickname,
    DateAdded,
    DateRemoved,
    Removal,
    Credits,
    Legal,
    Reddit,
    Email,
    TimeZone,
    TeamLead,
    Team,
    SecondTeam,
    Va,
    Nda,
    Cla,
    SceneFusion,
    Google,
    Github,
    Steamworks,
    Steam,
}

impl Column {
    /// Position of the column in a raw row.
    pub const fn index(self) -> usize {
        match self {
            Self::Status => 0,
            Self::Nickname => 1,
            Self::DateAdded => 4,
            Self::DateRemoved => 5,
            Self::Removal => 7,
            Self::Credits => 8,
            Self::Legal => 9,
            Self::Reddit => 10,
            Self::Email => 12,
            Self::TimeZone => 13,
            Self::TeamLead => 14,
            Self::Team => 15,
            Self::SecondTeam => 16,
            Self::Va => 17,
            Self::Nda => 18,
            Self::Cla => 19,
            Self::SceneFusion => 20,
            Self::Google => 21,
            Self::Github => 22,
            Self::Steamworks => 23,
            Self::Steam => 24,
        }
    }

    /// Field name used in error messages and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Nickname => "nickname",
            Self::DateAdded => "date_added",
            Self::DateRemoved => "date_removed",
            Self::Removal => "removal",
            Self::Credits => "credits",
            Self::Legal => "legal",
            Self::Reddit => "reddit",
            Self::Email => "email",
            Self::TimeZone => "time_zone",
            Self::TeamLead => "team_lead",
            Self::Team => "team",
            Self::SecondTeam => "second_team",
            Self::Va => "va",
            Self::Nda => "nda",
            Self::Cla => "cla",
            Self::SceneFusion => "scenefusion",
            Self::Google => "google",
            Self::Github => "github",
            Self::Steamworks => "steamworks",
            Self::Steam => "steam",
        }
    }
}

// =============================================================================
// Raw Row
// =============================================================================

/// A data row from the roster export.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source file
    pub line: usize,
    /// Cells in column order
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: usize, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// Cell for a named column (empty when the row is short).
    pub fn get(&self, column: Column) -> &str {
        self.cells
            .get(column.index())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

// =============================================================================
// Member Record
// =============================================================================

/// A roster member after normalization.
///
/// String fields keep their raw spacing; trimming happens when literals are
/// written. Dates are already rewritten to `YYYY-M-D` text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    /// Source line in the roster export
    pub line: usize,
    /// Team names, in the order they appear in the row
    pub teams: Vec<String>,
    pub nickname: String,
    pub credits: String,
    pub legal: String,
    pub time_zone: String,
    pub status: String,
    // accounts
    pub github: String,
    pub google: String,
    pub reddit: String,
    pub email: String,
    pub steamworks: String,
    pub steam: String,
    // documents
    pub va: bool,
    pub nda: bool,
    pub cla: bool,
    pub scenefusion: bool,
    // start/end
    pub date_added: Option<String>,
    pub date_removed: Option<String>,
    pub removal: String,
}

// =============================================================================
// SQL Values
// =============================================================================

/// A value in a member row literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Bool(bool),
    Text(String),
    Null,
    Integer(i64),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// `Null` for `None`, text otherwise.
    pub fn optional(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Self::text)
    }
}

impl fmt::Display for SqlValue {
    /// Writes the value as a SQL literal.
    ///
    /// Text is trimmed first; text that is empty after trimming is `NULL`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    f.write_str("NULL")
                } else {
                    write!(f, "'{}'", trimmed.replace('\'', "''"))
                }
            }
        }
    }
}
