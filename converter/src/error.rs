//! Error types for the roster conversion pipeline.
//!
//! One error type per stage:
//!
//! - [`ReadError`] - reading and decoding the roster CSV
//! - [`NormalizeError`] - turning raw cells into typed member fields
//! - [`ResolveError`] - mapping team names to team ids
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Conversion into [`PipelineError`] is automatic via `From`,
//! so `?` works across stage boundaries.

use thiserror::Error;

// =============================================================================
// Row Reader Errors
// =============================================================================

/// Errors while reading the roster export.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to open or read the file.
    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV layer rejected the input.
    #[error("Invalid CSV format: {0}")]
    Csv(#[from] csv::Error),

    /// The bytes could not be decoded into text.
    #[error("Failed to decode roster as {encoding}")]
    Encoding { encoding: String },

    /// A data row does not carry every roster column.
    #[error("Line {line}: expected at least {expected} columns, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// Field Normalizer Errors
// =============================================================================

/// Errors while normalizing a raw row into a member record.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A non-empty date cell is not in `MM/DD/YYYY` form.
    #[error("Line {line}, column '{column}' (value '{value}'): expected a MM/DD/YYYY date")]
    MalformedDate {
        line: usize,
        column: &'static str,
        value: String,
    },
}

// =============================================================================
// Team Resolver Errors
// =============================================================================

/// Errors while resolving team names to ids.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Team name missing from the alias table.
    #[error("Unknown team '{team}' for member '{nickname}' (line {line})")]
    UnknownTeam {
        team: String,
        nickname: String,
        line: usize,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::convert_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the roster failed.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// A row could not be normalized.
    #[error("Normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    /// A team name could not be resolved.
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Writing an output artifact failed.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reading operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for normalization.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Result type for team resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
