use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A report registered against the case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,

    /// Local path of the report file
    pub path: PathBuf,

    /// Module that generated the report
    pub source_module: String,

    pub display_name: String,

    pub created_at: DateTime<Utc>,
}
