//! Object code catalog types.

use chrono::{DateTime, Utc};
use finoffice_shared::types::{ObjectCodeId, ObjectCodeLevelId};
use serde::{Deserialize, Serialize};

/// Grouping level for object codes (department, function, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCodeLevel {
    /// Level ID.
    pub id: ObjectCodeLevelId,
    /// Unique short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Parent level.
    pub parent_id: Option<ObjectCodeLevelId>,
    /// False once soft-deleted.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A budget line identifier with its head of account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCode {
    /// Object code ID.
    pub id: ObjectCodeId,
    /// Unique code, e.g. `A01101`.
    pub code: String,
    /// Head-of-account description.
    pub head_of_account: String,
    /// Grouping level.
    pub level_id: Option<ObjectCodeLevelId>,
    /// False once soft-deleted.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Create or replace payload for a level.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelInput {
    /// Level code.
    pub code: String,
    /// Level name.
    pub name: String,
    /// Parent level.
    #[serde(default)]
    pub parent_id: Option<ObjectCodeLevelId>,
}

/// Create or replace payload for an object code.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCodeInput {
    /// Object code.
    pub code: String,
    /// Head of account.
    pub head_of_account: String,
    /// Grouping level.
    #[serde(default)]
    pub level_id: Option<ObjectCodeLevelId>,
}

/// A line of bulk import text that parsed cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRow {
    /// 1-based source line.
    pub line: usize,
    /// Object code.
    pub code: String,
    /// Head of account.
    pub head_of_account: String,
}

/// A line of bulk import text that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
    /// 1-based source line.
    pub line: usize,
    /// Why the line was skipped.
    pub reason: String,
}

/// Outcome of parsing bulk import text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Parsed rows, in input order.
    pub rows: Vec<ImportRow>,
    /// Skipped lines.
    pub issues: Vec<ImportIssue>,
}
