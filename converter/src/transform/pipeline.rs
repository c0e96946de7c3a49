//! High-level conversion API.
//!
//! Combines all steps: reading the export, normalizing rows, excluding
//! members, ordering them, and emitting the two literal files.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster2sql::{convert_file, ConvertOptions, TeamTable};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = convert_file(&ConvertOptions::default(), TeamTable::builtin())?;
//!     println!("Wrote {} members", report.member_count);
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::emit::{emit, summary, write_outputs, Emitted, FIRST_MEMBER_ID};
use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{MemberRecord, RawRow};
use crate::parser::{read_roster_file, ParseResult};
use super::normalize::normalize_rows;
use super::teams::TeamTable;

/// Roster export read when no input is given.
pub const DEFAULT_INPUT: &str = "Team Roster - Main Sheet.csv";

/// Member literals file.
pub const DEFAULT_MEMBERS_OUTPUT: &str = "output.txt";

/// Member/team association literals file.
pub const DEFAULT_TEAMS_OUTPUT: &str = "team_output.txt";

/// Member left out of the export by default.
pub const EXCLUDED_NICKNAME: &str = "mastercoms";

/// Field members are ordered by before ids are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// VA flag, unsigned members first
    Va,
    /// Date added as emitted text (`"2021-10-1"` before `"2021-4-1"`),
    /// undated members first. Keeps ids stable against earlier exports.
    #[default]
    DateAdded,
    /// Date added, oldest first; members without a parseable date come first
    DateAddedChrono,
    /// Nickname, byte order
    Nickname,
    /// Keep sheet order
    None,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "va" => Ok(Self::Va),
            "date-added" | "date_added" => Ok(Self::DateAdded),
            "date-added-chrono" | "date_added_chrono" => Ok(Self::DateAddedChrono),
            "nickname" => Ok(Self::Nickname),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown sort key '{}' (expected va, date-added, date-added-chrono, nickname or none)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Va => "va",
            Self::DateAdded => "date-added",
            Self::DateAddedChrono => "date-added-chrono",
            Self::Nickname => "nickname",
            Self::None => "none",
        })
    }
}

/// Options for a conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Roster CSV export
    pub input: PathBuf,

    /// Where member literals are written
    pub members_output: PathBuf,

    /// Where association literals are written
    pub teams_output: PathBuf,

    /// Member ordering
    pub sort_by: SortKey,

    /// Nicknames left out of the output
    pub excluded: Vec<String>,

    /// Id of the first emitted member
    pub first_id: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            members_output: PathBuf::from(DEFAULT_MEMBERS_OUTPUT),
            teams_output: PathBuf::from(DEFAULT_TEAMS_OUTPUT),
            sort_by: SortKey::default(),
            excluded: vec![EXCLUDED_NICKNAME.to_string()],
            first_id: FIRST_MEMBER_ID,
        }
    }
}

/// Outcome of a conversion written to disk
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub encoding: String,
    pub rows_read: usize,
    pub excluded_count: usize,
    /// Members emitted without any team membership
    pub teamless_count: usize,
    pub member_count: usize,
    pub association_count: usize,
}

/// Drop members whose nickname is listed in `excluded`.
///
/// Returns the kept members and how many were dropped.
pub fn exclude_members(members: Vec<MemberRecord>, excluded: &[String]) -> (Vec<MemberRecord>, usize) {
    let before = members.len();
    let kept: Vec<MemberRecord> = members
        .into_iter()
        .filter(|m| !excluded.iter().any(|nick| *nick == m.nickname))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

fn date_added_text(member: &MemberRecord) -> &str {
    member.date_added.as_deref().unwrap_or("")
}

fn date_added_chrono(member: &MemberRecord) -> Option<NaiveDate> {
    member
        .date_added
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// Stable sort of members by `key`.
pub fn sort_members(members: &mut [MemberRecord], key: SortKey) {
    match key {
        SortKey::Va => members.sort_by_key(|m| m.va),
        SortKey::DateAdded => members.sort_by(|a, b| date_added_text(a).cmp(date_added_text(b))),
        SortKey::DateAddedChrono => members.sort_by_key(date_added_chrono),
        SortKey::Nickname => members.sort_by(|a, b| a.nickname.cmp(&b.nickname)),
        SortKey::None => {}
    }
}

/// Members that will get no association rows.
pub fn teamless_members(members: &[MemberRecord]) -> Vec<&MemberRecord> {
    members.iter().filter(|m| m.teams.is_empty()).collect()
}

/// Pretty JSON of member records.
pub fn members_json(members: &[MemberRecord]) -> PipelineResult<String> {
    Ok(serde_json::to_string_pretty(members)?)
}

/// Normalize, exclude and order the members of parsed rows.
///
/// Returns the ordered members and the number excluded.
pub fn prepare_members(rows: &[RawRow], options: &ConvertOptions) -> PipelineResult<(Vec<MemberRecord>, usize)> {
    let members = normalize_rows(rows)?;
    let (mut members, excluded) = exclude_members(members, &options.excluded);
    sort_members(&mut members, options.sort_by);
    Ok((members, excluded))
}

/// Convert parsed rows into rendered artifacts, without touching the disk.
pub fn convert_rows(rows: &[RawRow], options: &ConvertOptions, teams: &TeamTable) -> PipelineResult<Emitted> {
    let (members, _) = prepare_members(rows, options)?;
    Ok(emit(&members, teams, options.first_id)?)
}

fn log_parse_result(parse_result: &ParseResult) {
    log_success(format!("Detected encoding: {}", parse_result.encoding));
    log_success(format!(
        "Read {} rows ({} header rows skipped)",
        parse_result.rows.len(),
        parse_result.header_rows
    ));
    if parse_result.blank_rows > 0 {
        log_warning(format!("Ignored {} blank rows", parse_result.blank_rows));
    }
}

/// Read the roster and return ordered members (debug output, no ids).
pub fn load_members(options: &ConvertOptions) -> PipelineResult<Vec<MemberRecord>> {
    log_info(format!("📖 Reading {}", options.input.display()));
    let parse_result = read_roster_file(&options.input)?;
    log_parse_result(&parse_result);

    let (members, excluded) = prepare_members(&parse_result.rows, options)?;
    if excluded > 0 {
        log_info(format!("Excluded {} member(s)", excluded));
    }
    Ok(members)
}

/// Run the full conversion: read, normalize, order, emit, write.
///
/// Both artifacts are rendered before anything is written, so a failure
/// in any step leaves existing output files untouched.
pub fn convert_file(options: &ConvertOptions, teams: &TeamTable) -> PipelineResult<ConversionReport> {
    log_info(format!("📖 Reading {}", options.input.display()));
    let parse_result = read_roster_file(&options.input)?;
    log_parse_result(&parse_result);

    log_info("⚙️  Normalizing rows...");
    let (members, excluded_count) = prepare_members(&parse_result.rows, options)?;
    if excluded_count > 0 {
        log_info_indent(
            format!("Excluded {} member(s): {}", excluded_count, options.excluded.join(", ")),
            1,
        );
    }
    log_info_indent(format!("Ordered by {}", options.sort_by), 1);

    let teamless = teamless_members(&members);
    for member in &teamless {
        log_warning(format!(
            "Member '{}' (line {}) has no team and gets no team rows",
            member.nickname, member.line
        ));
    }
    let teamless_count = teamless.len();

    log_info("🔗 Resolving teams and rendering literals...");
    let emitted = emit(&members, teams, options.first_id)?;
    log_success(summary(&emitted));

    write_outputs(&emitted, &options.members_output, &options.teams_output)?;
    log_success(format!(
        "Wrote {} and {}",
        options.members_output.display(),
        options.teams_output.display()
    ));

    Ok(ConversionReport {
        encoding: parse_result.encoding,
        rows_read: parse_result.rows.len(),
        excluded_count,
        teamless_count,
        member_count: emitted.member_count,
        association_count: emitted.association_count,
    })
}
