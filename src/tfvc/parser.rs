//! Line-oriented parser for `tf workfold` output.
//!
//! Both CLI variants print the same shape:
//!
//! ```text
//! =====================================
//! Workspace : MyWorkspace (Owner Name)
//! Collection: http://server:8080/tfs/
//!  $/project1/subfolder: /path
//! ```
//!
//! and differ only in the details captured by [`OutputFormat`].

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

use super::error::{TfvcError, TfvcErrorCode};
use super::strings::MessageCatalog;
use super::workspace::{self, Workspace, WorkspaceHeader, WorkspaceMapping};
use super::{CliVariant, ExecutionResult};

/// `Label: value` with arbitrary padding around the colon.
/// Captures: 1=label, 2=value
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^:]+?)\s*:\s*(.*?)\s*$").unwrap());

/// Value followed by a parenthetical, possibly nested: `Name (Jeff Young (TFS))`.
/// Captures: 1=value
static TRAILING_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\(.*\)$").unwrap());

const SERVER_PATH_PREFIX: &str = "$/";
const CLOAKED_PREFIX: &str = "(cloaked)";

/// Formatting conventions of one CLI variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    pub variant: CliVariant,
    /// Lowercase stderr fragments printed when the path is not in a workspace
    not_found_messages: &'static [&'static str],
    /// Indentation in front of mapping lines
    mapping_indent: &'static str,
    /// Workspace names are followed by the owner's display name in parentheses
    strips_name_suffix: bool,
}

pub const CLC_FORMAT: OutputFormat = OutputFormat {
    variant: CliVariant::Clc,
    not_found_messages: &[
        "the workspace could not be determined",
        "unable to determine the workspace",
    ],
    mapping_indent: "",
    strips_name_suffix: false,
};

pub const EXE_FORMAT: OutputFormat = OutputFormat {
    variant: CliVariant::Exe,
    not_found_messages: &[
        "unable to determine the source control server",
        "unable to determine the workspace",
    ],
    mapping_indent: " ",
    strips_name_suffix: true,
};

impl OutputFormat {
    pub fn for_variant(variant: CliVariant) -> &'static OutputFormat {
        match variant {
            CliVariant::Clc => &CLC_FORMAT,
            CliVariant::Exe => &EXE_FORMAT,
        }
    }

    fn is_not_found(&self, stderr: &str) -> bool {
        let stderr = stderr.to_lowercase();
        self.not_found_messages.iter().any(|m| stderr.contains(m))
    }

    fn parse_mapping(&self, line: &str) -> Option<WorkspaceMapping> {
        let body = line.strip_prefix(self.mapping_indent).unwrap_or(line);
        let (cloaked, body) = match body.strip_prefix(CLOAKED_PREFIX) {
            Some(rest) => (true, rest.trim_start()),
            None => (false, body),
        };
        if !body.starts_with(SERVER_PATH_PREFIX) {
            return None;
        }
        // Server paths never contain ':', local paths may (C:\src)
        let (server_path, local_path) = body.split_once(':')?;
        Some(WorkspaceMapping {
            server_path: server_path.trim().to_string(),
            local_path: local_path.trim().to_string(),
            cloaked,
        })
    }

    fn header_value(&self, label: &str, value: &str) -> Option<String> {
        let value = if self.strips_name_suffix && label == "Workspace" {
            TRAILING_PAREN_RE
                .captures(value)
                .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
                .filter(|v| !v.is_empty())
                .unwrap_or(value)
        } else {
            value
        };
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// Inputs shared by both parse entry points.
pub struct ParseRequest<'a> {
    pub local_path: &'a str,
    pub restrict_workspace: bool,
    pub catalog: &'a dyn MessageCatalog,
}

/// Parse one execution result into a workspace.
///
/// `Ok(None)` means the tool ran cleanly and reported nothing.
pub fn parse(
    format: &OutputFormat,
    result: &ExecutionResult,
    request: &ParseRequest<'_>,
) -> Result<Option<Workspace>, TfvcError> {
    let error = |code, detail: Option<&str>| TfvcError::new(code, request.catalog, detail);

    let stdout = result
        .stdout
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let Some(stdout) = stdout else {
        let stderr = result.stderr.as_deref().map(str::trim).unwrap_or_default();
        if format.is_not_found(stderr) {
            debug!(variant = ?format.variant, "tfvc:parse not a workspace");
            return Err(error(TfvcErrorCode::NotATfvcRepository, Some(stderr)));
        }
        if result.exit_code != 0 {
            debug!(
                variant = ?format.variant,
                exit_code = result.exit_code,
                stderr = %stderr,
                "tfvc:parse command failed"
            );
            let detail = format!("exit code {}: {}", result.exit_code, stderr);
            return Err(error(TfvcErrorCode::CommandFailed, Some(detail.as_str())));
        }
        debug!(variant = ?format.variant, "tfvc:parse empty output");
        return Ok(None);
    };

    let mut header = WorkspaceHeader::default();
    let mut mappings = Vec::new();
    let mut saw_header = false;
    let mut saw_english_label = false;

    for line in stdout.lines().map(str::trim_end) {
        if line.trim().is_empty() || line.trim_start().starts_with('=') {
            continue;
        }
        if let Some(mapping) = format.parse_mapping(line) {
            trace!(server_path = %mapping.server_path, cloaked = mapping.cloaked, "tfvc:parse mapping");
            mappings.push(mapping);
            continue;
        }
        if !mappings.is_empty() {
            trace!(line, "tfvc:parse ignoring line after mappings");
            continue;
        }
        let Some(caps) = HEADER_RE.captures(line) else {
            continue;
        };
        saw_header = true;
        let (label, value) = (&caps[1], &caps[2]);
        let value = format.header_value(label, value);
        match label {
            "Workspace" => {
                saw_english_label = true;
                header.name = value;
            }
            "Collection" => {
                saw_english_label = true;
                header.server = value;
            }
            "Comment" => header.comment = value,
            "Computer" => header.computer = value,
            "Owner" | "Owner(s)" => header.owner = value,
            _ => trace!(label, "tfvc:parse ignoring label"),
        }
    }

    if mappings.is_empty() && result.exit_code != 0 {
        let stderr = result.stderr.as_deref().map(str::trim).unwrap_or_default();
        if format.is_not_found(stdout) || format.is_not_found(stderr) {
            debug!(variant = ?format.variant, "tfvc:parse not a workspace");
            return Err(error(TfvcErrorCode::NotATfvcRepository, Some(stdout)));
        }
        debug!(
            variant = ?format.variant,
            exit_code = result.exit_code,
            "tfvc:parse command failed with output"
        );
        let mut detail = format!("exit code {}: {}", result.exit_code, stdout);
        if !stderr.is_empty() {
            detail.push('\n');
            detail.push_str(stderr);
        }
        return Err(error(TfvcErrorCode::CommandFailed, Some(detail.as_str())));
    }

    if saw_header && !saw_english_label {
        debug!(variant = ?format.variant, "tfvc:parse non-English labels");
        return Err(error(TfvcErrorCode::NotAnEnuTfCommandLine, None));
    }

    let mapping_count = mappings.len();
    let workspace = workspace::resolve(
        header,
        mappings,
        request.local_path,
        request.restrict_workspace,
    )
    .ok_or_else(|| error(TfvcErrorCode::NotATfvcRepository, None))?;

    debug!(
        variant = ?format.variant,
        name = ?workspace.name,
        mappings = mapping_count,
        "tfvc:parse workspace"
    );
    Ok(Some(workspace))
}
