//! Tool names exposed to the model, as a closed enum.
//!
//! Keeping the names in one strum-derived enum means adding a tool is a
//! compile-time-checked change rather than a string-table edit.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// The operations the model may request during a review session.
#[derive(
    Debug, Clone, Copy, Display, EnumString, IntoStaticStr, PartialEq, Eq, Hash, Serialize,
    Deserialize,
)]
pub enum ToolName {
    /// Recursive file listing under the reviewed directory.
    #[strum(serialize = "list_files")]
    ListFiles,

    /// Full text content of a single file.
    #[strum(serialize = "read_file")]
    ReadFile,

    /// Write model-supplied content back to a file (opt-in only).
    #[strum(serialize = "write_file")]
    WriteFile,
}

impl ToolName {
    /// Whether the tool mutates the reviewed directory.
    pub fn mutates_files(&self) -> bool {
        matches!(self, ToolName::WriteFile)
    }
}
