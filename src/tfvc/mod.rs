mod args;
mod error;
mod find_workspace;
mod parser;
mod strings;
mod workspace;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use self::args::{ArgumentBuilder, SECRET_MASK};
pub use self::error::{TfvcError, TfvcErrorCode};
pub use self::find_workspace::{CommandOptions, FindWorkspace};
pub use self::parser::OutputFormat;
pub use self::strings::{DefaultCatalog, MessageCatalog, MessageKey, OverrideCatalog};
pub use self::workspace::{Workspace, WorkspaceMapping};

/// Outcome of running a TF command, as captured by the process runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// Which TF executable produced the output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CliVariant {
    /// Cross-platform command line client (`tf`)
    #[default]
    Clc,
    /// Native Windows client (`tf.exe`)
    Exe,
}

impl CliVariant {
    /// Infer the variant from the executable path: `tf.exe` is the native client.
    pub fn from_executable(path: &Path) -> Self {
        let is_exe = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case("tf.exe"));
        if is_exe {
            CliVariant::Exe
        } else {
            CliVariant::Clc
        }
    }
}
