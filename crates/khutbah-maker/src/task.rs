use std::fmt;

use chrono::Local;
use uuid::Uuid;

/// Correlation id for one generation request, used only to tag log lines.
///
/// Format: `YYYYMMDD_HHMMSS_{8 hex chars}`. Practically unique for human log
/// reading; no stronger guarantee is needed or made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskId(String);

impl TaskId {
    pub fn new() -> Self {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let suffix = Uuid::new_v4().simple().to_string();
        TaskId(format!("{timestamp}_{}", &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
