//! SQL row literal emission.
//!
//! Produces the two text artifacts loaded into the roster database:
//!
//! ```text
//! output.txt       (2, 'alice', 'Alice A.', NULL, ..., TRUE, FALSE, '2021-4-1', NULL, NULL),
//! team_output.txt  (2, 6),
//! ```
//!
//! Every line ends with a comma, including the last one.

use std::path::Path;

use crate::error::{PipelineError, PipelineResult, ResolveResult};
use crate::models::{MemberRecord, SqlValue};
use crate::transform::teams::{TeamId, TeamTable};

/// Id given to the first emitted member.
pub const FIRST_MEMBER_ID: u32 = 2;

/// Rendered artifacts of one conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emitted {
    /// Member row literals, one per line
    pub members: String,
    /// Member/team association literals, one per line
    pub associations: String,
    pub member_count: usize,
    pub association_count: usize,
}

/// Values of a member row, in `members` column order.
pub fn member_values(id: u32, member: &MemberRecord) -> Vec<SqlValue> {
    vec![
        SqlValue::Integer(i64::from(id)),
        SqlValue::text(member.nickname.as_str()),
        SqlValue::text(member.credits.as_str()),
        SqlValue::text(member.legal.as_str()),
        SqlValue::text(member.time_zone.as_str()),
        SqlValue::text(member.status.as_str()),
        SqlValue::text(member.github.as_str()),
        // discord handle, which the roster tracks as the nickname
        SqlValue::text(member.nickname.as_str()),
        SqlValue::text(member.google.as_str()),
        SqlValue::text(member.reddit.as_str()),
        SqlValue::text(member.email.as_str()),
        SqlValue::text(member.steamworks.as_str()),
        SqlValue::text(member.steam.as_str()),
        SqlValue::Bool(member.va),
        SqlValue::Bool(member.nda),
        SqlValue::Bool(member.cla),
        SqlValue::Bool(member.scenefusion),
        SqlValue::optional(member.date_added.as_deref()),
        SqlValue::optional(member.date_removed.as_deref()),
        SqlValue::text(member.removal.as_str()),
    ]
}

/// `(v1, v2, ...),` followed by a newline.
pub fn member_line(id: u32, member: &MemberRecord) -> String {
    let values: Vec<String> = member_values(id, member)
        .iter()
        .map(SqlValue::to_string)
        .collect();
    format!("({}),\n", values.join(", "))
}

/// `(member_id, team_id),` followed by a newline.
pub fn association_line(member_id: u32, team_id: TeamId) -> String {
    format!("({}, {}),\n", member_id, team_id)
}

/// Assign ids from `first_id` in slice order and render both artifacts.
///
/// Fails on the first team name missing from `teams`; nothing is rendered
/// partially in that case.
pub fn emit(members: &[MemberRecord], teams: &TeamTable, first_id: u32) -> ResolveResult<Emitted> {
    let mut emitted = Emitted::default();

    for (member_id, member) in (first_id..).zip(members) {
        for team_id in teams.resolve_member(member)? {
            emitted.associations.push_str(&association_line(member_id, team_id));
            emitted.association_count += 1;
        }

        emitted.members.push_str(&member_line(member_id, member));
        emitted.member_count += 1;
    }

    Ok(emitted)
}

/// Write one artifact, replacing any previous content.
fn write_artifact(path: &Path, content: &str) -> PipelineResult<()> {
    std::fs::write(path, content).map_err(|source| PipelineError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Write member lines to `members_path` and association lines to `teams_path`.
pub fn write_outputs(emitted: &Emitted, members_path: &Path, teams_path: &Path) -> PipelineResult<()> {
    write_artifact(members_path, &emitted.members)?;
    write_artifact(teams_path, &emitted.associations)?;
    Ok(())
}

/// Summary line for logs, e.g. "3 members, 5 team memberships".
pub fn summary(emitted: &Emitted) -> String {
    format!(
        "{} member{}, {} team membership{}",
        emitted.member_count,
        if emitted.member_count == 1 { "" } else { "s" },
        emitted.association_count,
        if emitted.association_count == 1 { "" } else { "s" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(nickname: &str, teams: &[&str]) -> MemberRecord {
        MemberRecord {
            nickname: nickname.to_string(),
            teams: teams.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_member_line_layout() {
        let record = MemberRecord {
            nickname: "alice".into(),
            credits: "Alice A.".into(),
            legal: "Alice O'Brien".into(),
            time_zone: "UTC+1 ".into(),
            status: "Active".into(),
            github: "alice-gh".into(),
            google: "alice@gmail.com".into(),
            email: "alice@example.com".into(),
            va: true,
            cla: true,
            date_added: Some("2021-4-1".into()),
            ..Default::default()
        };

        assert_eq!(
            member_line(2, &record),
            "(2, 'alice', 'Alice A.', 'Alice O''Brien', 'UTC+1', 'Active', 'alice-gh', 'alice', \
             'alice@gmail.com', NULL, 'alice@example.com', NULL, NULL, TRUE, FALSE, TRUE, FALSE, \
             '2021-4-1', NULL, NULL),\n"
        );
    }

    #[test]
    fn test_member_values_count() {
        assert_eq!(member_values(2, &MemberRecord::default()).len(), 20);
    }

    #[test]
    fn test_association_line() {
        assert_eq!(association_line(7, 13), "(7, 13),\n");
    }

    #[test]
    fn test_ids_sequential_from_first() {
        let members = vec![member("a", &["PR"]), member("b", &[]), member("c", &["Music"])];
        let emitted = emit(&members, TeamTable::builtin(), FIRST_MEMBER_ID).unwrap();

        let ids: Vec<&str> = emitted
            .members
            .lines()
            .map(|l| l.trim_start_matches('(').split(',').next().unwrap())
            .collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
        assert_eq!(emitted.associations, "(2, 5),\n(4, 12),\n");
        assert_eq!(emitted.member_count, 3);
        assert_eq!(emitted.association_count, 2);
    }

    #[test]
    fn test_lead_associations_in_order() {
        let members = vec![member("lead", &["Programming", "Team Leads"])];
        let emitted = emit(&members, TeamTable::builtin(), FIRST_MEMBER_ID).unwrap();
        assert_eq!(emitted.associations, "(2, 6),\n(2, 3),\n");
    }

    #[test]
    fn test_unknown_team_fails() {
        let members = vec![member("a", &["PR"]), member("b", &["Catering"])];
        let err = emit(&members, TeamTable::builtin(), FIRST_MEMBER_ID).unwrap_err();
        assert!(err.to_string().contains("Catering"));
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_write_outputs_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let members_path = dir.path().join("output.txt");
        let teams_path = dir.path().join("team_output.txt");
        std::fs::write(&members_path, "stale content\nmore\n").unwrap();

        let emitted = emit(&[member("a", &["PR"])], TeamTable::builtin(), FIRST_MEMBER_ID).unwrap();
        write_outputs(&emitted, &members_path, &teams_path).unwrap();

        assert_eq!(std::fs::read_to_string(&members_path).unwrap(), emitted.members);
        assert_eq!(std::fs::read_to_string(&teams_path).unwrap(), "(2, 5),\n");
    }

    #[test]
    fn test_summary() {
        let emitted = Emitted {
            member_count: 1,
            association_count: 3,
            ..Default::default()
        };
        assert_eq!(summary(&emitted), "1 member, 3 team memberships");
    }
}
