//! Team name resolution.
//!
//! Team names come from free text in the roster, so several spellings map to
//! the same team id. The built-in table mirrors the `teams` table of the
//! roster database.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

use crate::error::{ResolveError, ResolveResult};
use crate::models::MemberRecord;

/// Team id type, as stored in the `teams` table.
pub type TeamId = u32;

/// Team name added for members flagged as team lead.
pub const TEAM_LEADS: &str = "Team Leads";

/// Built-in aliases (name, team id).
const BUILTIN_ALIASES: &[(&str, TeamId)] = &[
    ("Project Management", 2),
    ("Production", 2),
    (TEAM_LEADS, 3),
    ("Public Relations", 5),
    ("PR", 5),
    ("Programming", 6),
    ("3D", 7),
    ("3D Art", 7),
    ("Animation", 8),
    ("Texture Art", 9),
    ("2D Art", 9),
    ("VFX", 10),
    ("VFXX", 10),
    ("Concept Art", 11),
    ("Music", 12),
    ("Design", 13),
    ("Level Design", 13),
    ("Game Design", 14),
    ("Sound Design", 15),
    ("SFX", 15),
    ("Web Dev", 16),
    ("Dev Ops", 17),
    ("Writing", 19),
    ("Consulting", 20),
];

static BUILTIN: Lazy<TeamTable> = Lazy::new(|| TeamTable::from_pairs(BUILTIN_ALIASES.iter().copied()));

/// Immutable team name -> team id lookup.
///
/// Lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamTable {
    aliases: HashMap<String, TeamId>,
}

impl TeamTable {
    /// The table compiled into the binary.
    pub fn builtin() -> &'static TeamTable {
        &BUILTIN
    }

    /// Build a table from (name, id) pairs. Later pairs win on duplicate names.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, TeamId)>,
        S: Into<String>,
    {
        Self {
            aliases: pairs.into_iter().map(|(name, id)| (name.into(), id)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<TeamId> {
        self.aliases.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Resolve every team of a member, in team-list order.
    pub fn resolve_member(&self, member: &MemberRecord) -> ResolveResult<Vec<TeamId>> {
        member
            .teams
            .iter()
            .map(|team| {
                self.get(team).ok_or_else(|| ResolveError::UnknownTeam {
                    team: team.clone(),
                    nickname: member.nickname.clone(),
                    line: member.line,
                })
            })
            .collect()
    }

    /// Aliases grouped by team id, ids ascending and names sorted.
    pub fn by_id(&self) -> BTreeMap<TeamId, Vec<&str>> {
        let mut grouped: BTreeMap<TeamId, Vec<&str>> = BTreeMap::new();
        for (name, id) in &self.aliases {
            grouped.entry(*id).or_default().push(name.as_str());
        }
        for names in grouped.values_mut() {
            names.sort_unstable();
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_aliases() {
        let table = TeamTable::builtin();
        assert_eq!(table.get("Public Relations"), Some(5));
        assert_eq!(table.get("PR"), Some(5));
        assert_eq!(table.get("Team Leads"), Some(3));
        assert_eq!(table.get("Consulting"), Some(20));
        assert_eq!(table.len(), BUILTIN_ALIASES.len());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = TeamTable::builtin();
        assert_eq!(table.get("programming"), None);
        assert_eq!(table.get("Programming "), None);
    }

    #[test]
    fn test_resolve_member_in_order() {
        let member = MemberRecord {
            teams: vec!["Programming".into(), TEAM_LEADS.into(), "SFX".into()],
            ..Default::default()
        };
        let ids = TeamTable::builtin().resolve_member(&member).unwrap();
        assert_eq!(ids, vec![6, 3, 15]);
    }

    #[test]
    fn test_unknown_team_names_member() {
        let member = MemberRecord {
            line: 8,
            nickname: "carol".into(),
            teams: vec!["Programming".into(), "Catering".into()],
            ..Default::default()
        };
        let err = TeamTable::builtin().resolve_member(&member).unwrap_err();
        let ResolveError::UnknownTeam { team, nickname, line } = err;
        assert_eq!(team, "Catering");
        assert_eq!(nickname, "carol");
        assert_eq!(line, 8);
    }

    #[test]
    fn test_custom_table() {
        let table = TeamTable::from_pairs([("Ops", 1), ("Operations", 1), ("QA", 4)]);
        let grouped = table.by_id();
        assert_eq!(grouped[&1], vec!["Operations", "Ops"]);
        assert_eq!(grouped[&4], vec!["QA"]);
        assert_eq!(table.get("Programming"), None);
    }
}
