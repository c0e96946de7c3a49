//! Transformation module.
//!
//! This module turns raw roster rows into ordered member records:
//! - Normalize: raw cells to typed member fields
//! - Teams: team name to team id lookup
//! - Pipeline: the full conversion, from export to literal files

pub mod normalize;
pub mod pipeline;
pub mod teams;

pub use normalize::{handle_date, handle_team, is_yes, normalize_row, normalize_rows};
pub use pipeline::*;
pub use teams::{TeamId, TeamTable, TEAM_LEADS};
