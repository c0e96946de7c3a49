//! # roster2sql - Team roster to SQL row literals
//!
//! Converts the "Main Sheet" CSV export of the team roster into the row
//! lists of two `INSERT ... VALUES` statements: one for the members table
//! and one for the member/team association table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV export │────▶│   Parser    │────▶│  Transform  │────▶│    Emit     │
//! │ (2 headers) │     │  (RawRow)   │     │ (normalize, │     │ output.txt  │
//! │             │     │             │     │ filter,sort)│     │ team_output │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster2sql::{convert_file, ConvertOptions, TeamTable};
//!
//! let report = convert_file(&ConvertOptions::default(), TeamTable::builtin()).unwrap();
//! println!("Converted {} members", report.member_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`logs`] - Pipeline log output
//! - [`models`] - Column layout, raw rows, member records, SQL values
//! - [`parser`] - CSV reading and decoding
//! - [`transform`] - Normalization, team lookup, pipeline
//! - [`emit`] - SQL literal rendering and output files

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod emit;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{NormalizeError, PipelineError, ReadError, ResolveError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Column, MemberRecord, RawRow, SqlValue, COLUMN_COUNT};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_auto,
    decode_content,
    detect_encoding,
    parse_bytes,
    parse_str,
    read_roster_file,
    ParseResult,
    HEADER_ROWS,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    handle_date,
    handle_team,
    is_yes,
    normalize_row,
    TeamId,
    TeamTable,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    convert_file,
    convert_rows,
    exclude_members,
    load_members,
    members_json,
    prepare_members,
    sort_members,
    teamless_members,
    ConversionReport,
    ConvertOptions,
    SortKey,
};

// =============================================================================
// Re-exports - Emit
// =============================================================================

pub use emit::{emit, write_outputs, Emitted, FIRST_MEMBER_ID};
