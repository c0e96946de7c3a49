//! Field normalization: raw roster cells to a [`MemberRecord`].

use crate::error::{NormalizeError, NormalizeResult};
use crate::models::{Column, MemberRecord, RawRow};
use super::teams::TEAM_LEADS;

/// Suffix the sheet appends to team names ("Programming Team").
const TEAM_SUFFIX: &str = " Team";

/// Separator between several teams in one cell.
const TEAM_SEPARATOR: char = '/';

/// Rewrite a `M/D/YYYY` date as `YYYY-M-D`.
///
/// Components are moved, not reformatted: `"4/1/2021"` becomes `"2021-4-1"`.
/// Returns `None` when the value does not have exactly three parts.
pub fn handle_date(date: &str) -> Option<String> {
    let mut parts = date.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(format!("{}-{}-{}", year, month, day))
}

/// Split a team cell into team names.
///
/// `"3D Art Team/Animation Team"` becomes `["3D Art", "Animation"]`.
pub fn handle_team(team: &str) -> Vec<String> {
    team.replace(TEAM_SUFFIX, "")
        .split(TEAM_SEPARATOR)
        .map(str::to_string)
        .collect()
}

/// Sheet checkbox columns export as "Yes"; anything else is false.
pub fn is_yes(value: &str) -> bool {
    value == "Yes"
}

/// Date cell for a column; blank cells are no date.
fn date_cell(row: &RawRow, column: Column) -> NormalizeResult<Option<String>> {
    let value = row.get(column);
    if value.trim().is_empty() {
        return Ok(None);
    }
    handle_date(value)
        .map(Some)
        .ok_or_else(|| NormalizeError::MalformedDate {
            line: row.line,
            column: column.name(),
            value: value.to_string(),
        })
}

/// Teams of a row: the team cell, then "Team Leads" for leads, then the second team cell.
fn team_list(row: &RawRow) -> Vec<String> {
    let mut teams = Vec::new();

    let primary = row.get(Column::Team);
    if !primary.trim().is_empty() {
        teams.extend(handle_team(primary));
    }
    if is_yes(row.get(Column::TeamLead)) {
        teams.push(TEAM_LEADS.to_string());
    }
    let second = row.get(Column::SecondTeam);
    if !second.trim().is_empty() {
        teams.extend(handle_team(second));
    }

    teams
}

/// Build a member record from a raw row.
pub fn normalize_row(row: &RawRow) -> NormalizeResult<MemberRecord> {
    let text = |column: Column| row.get(column).to_string();
    let flag = |column: Column| is_yes(row.get(column));

    Ok(MemberRecord {
        line: row.line,
        teams: team_list(row),
        nickname: text(Column::Nickname),
        credits: text(Column::Credits),
        legal: text(Column::Legal),
        time_zone: text(Column::TimeZone),
        status: text(Column::Status),
        github: text(Column::Github),
        google: text(Column::Google),
        reddit: text(Column::Reddit),
        email: text(Column::Email),
        steamworks: text(Column::Steamworks),
        steam: text(Column::Steam),
        va: flag(Column::Va),
        nda: flag(Column::Nda),
        cla: flag(Column::Cla),
        scenefusion: flag(Column::SceneFusion),
        date_added: date_cell(row, Column::DateAdded)?,
        date_removed: date_cell(row, Column::DateRemoved)?,
        removal: text(Column::Removal),
    })
}

/// Normalize every row, stopping at the first failure.
pub fn normalize_rows(rows: &[RawRow]) -> NormalizeResult<Vec<MemberRecord>> {
    rows.iter().map(normalize_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::COLUMN_COUNT;

    fn row(values: &[(Column, &str)]) -> RawRow {
        let mut cells = vec![String::new(); COLUMN_COUNT];
        for (column, value) in values {
            cells[column.index()] = value.to_string();
        }
        RawRow::new(3, cells)
    }

    #[test]
    fn test_handle_date_reorders_without_padding() {
        assert_eq!(handle_date("4/1/2021").as_deref(), Some("2021-4-1"));
        assert_eq!(handle_date("12/25/2019").as_deref(), Some("2019-12-25"));
        assert_eq!(handle_date("04/01/2021").as_deref(), Some("2021-04-01"));
    }

    #[test]
    fn test_handle_date_wrong_part_count() {
        assert_eq!(handle_date("2021-04-01"), None);
        assert_eq!(handle_date("4/2021"), None);
        assert_eq!(handle_date("4/1/2021/7"), None);
    }

    #[test]
    fn test_handle_team() {
        assert_eq!(handle_team("3D Art Team/Animation Team"), vec!["3D Art", "Animation"]);
        assert_eq!(handle_team("PR"), vec!["PR"]);
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("Yes"));
        assert!(!is_yes("yes"));
        assert!(!is_yes("No"));
        assert!(!is_yes(""));
        assert!(!is_yes("Yes "));
    }

    #[test]
    fn test_team_lead_appends_team_leads() {
        let record = normalize_row(&row(&[
            (Column::Team, "Programming Team"),
            (Column::TeamLead, "Yes"),
        ]))
        .unwrap();
        assert_eq!(record.teams, vec!["Programming", "Team Leads"]);
    }

    #[test]
    fn test_second_team_after_lead() {
        let record = normalize_row(&row(&[
            (Column::Team, "Design Team"),
            (Column::TeamLead, "Yes"),
            (Column::SecondTeam, "Writing Team/PR"),
        ]))
        .unwrap();
        assert_eq!(record.teams, vec!["Design", "Team Leads", "Writing", "PR"]);
    }

    #[test]
    fn test_blank_team_cells() {
        let record = normalize_row(&row(&[(Column::Nickname, "dave")])).unwrap();
        assert!(record.teams.is_empty());
    }

    #[test]
    fn test_fields_mapped_from_columns() {
        let record = normalize_row(&row(&[
            (Column::Status, "Active"),
            (Column::Nickname, "alice"),
            (Column::Legal, " O'Brien "),
            (Column::DateAdded, "4/1/2021"),
            (Column::Va, "Yes"),
            (Column::Nda, "No"),
            (Column::Github, "alice-gh"),
            (Column::Steam, "7656119"),
        ]))
        .unwrap();

        assert_eq!(record.line, 3);
        assert_eq!(record.status, "Active");
        assert_eq!(record.nickname, "alice");
        assert_eq!(record.legal, " O'Brien ");
        assert_eq!(record.date_added.as_deref(), Some("2021-4-1"));
        assert_eq!(record.date_removed, None);
        assert!(record.va);
        assert!(!record.nda);
        assert_eq!(record.github, "alice-gh");
        assert_eq!(record.steam, "7656119");
    }

    #[test]
    fn test_malformed_date_names_column() {
        let err = normalize_row(&row(&[
            (Column::DateAdded, "4/1/2021"),
            (Column::DateRemoved, "yesterday"),
        ]))
        .unwrap_err();

        let NormalizeError::MalformedDate { line, column, value } = err;
        assert_eq!(line, 3);
        assert_eq!(column, "date_removed");
        assert_eq!(value, "yesterday");
    }
}
