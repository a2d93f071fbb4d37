use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::debug;

/// One `$/server/path <-> local path` association of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceMapping {
    pub server_path: String,
    pub local_path: String,
    /// Cloaked entries exclude a server path and have no local path.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cloaked: bool,
}

impl WorkspaceMapping {
    /// The team project is the first segment after `$/`.
    pub fn team_project(&self) -> &str {
        team_project_of(&self.server_path)
    }
}

/// Header fields reported above the mapping lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceHeader {
    pub name: Option<String>,
    pub server: Option<String>,
    pub comment: Option<String>,
    pub computer: Option<String>,
    pub owner: Option<String>,
}

/// A resolved TFVC workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    pub name: Option<String>,
    pub server: Option<String>,
    pub default_team_project: String,
    pub comment: Option<String>,
    pub computer: Option<String>,
    pub owner: Option<String>,
    pub mappings: Vec<WorkspaceMapping>,
}

pub fn team_project_of(server_path: &str) -> &str {
    let rest = server_path.strip_prefix("$/").unwrap_or(server_path);
    rest.split('/').next().unwrap_or_default()
}

/// Decode `%XX` escapes in a collection URL.
pub fn decode_server_url(url: &str) -> String {
    percent_decode_str(url).decode_utf8_lossy().into_owned()
}

/// Build the workspace from parsed header fields and mappings.
///
/// Returns `None` only when `mappings` is empty. With `restrict` set, the
/// default team project is the one that best matches `local_path`; this is a
/// refinement and falls back to the first mapping instead of failing.
pub fn resolve(
    header: WorkspaceHeader,
    mappings: Vec<WorkspaceMapping>,
    local_path: &str,
    restrict: bool,
) -> Option<Workspace> {
    let candidates: Vec<&WorkspaceMapping> = {
        let visible: Vec<_> = mappings.iter().filter(|m| !m.cloaked).collect();
        if visible.is_empty() {
            mappings.iter().collect()
        } else {
            visible
        }
    };
    let first = *candidates.first()?;

    let selected = if restrict {
        select_for_local_path(&candidates, local_path).unwrap_or(first)
    } else {
        first
    };
    let default_team_project = selected.team_project().to_string();

    debug!(
        team_project = %default_team_project,
        restrict,
        mappings = mappings.len(),
        "tfvc:resolved workspace"
    );

    Some(Workspace {
        name: header.name,
        server: header.server.as_deref().map(decode_server_url),
        default_team_project,
        comment: header.comment,
        computer: header.computer,
        owner: header.owner,
        mappings,
    })
}

fn select_for_local_path<'a>(
    candidates: &[&'a WorkspaceMapping],
    local_path: &str,
) -> Option<&'a WorkspaceMapping> {
    let segments = path_segments(local_path);
    let names_project = |m: &WorkspaceMapping| {
        let project = m.team_project();
        !project.is_empty() && segments.iter().any(|s| s.eq_ignore_ascii_case(project))
    };

    // Deepest mapped folder containing the path whose project is also named in it
    let containing: Vec<&'a WorkspaceMapping> = candidates
        .iter()
        .copied()
        .filter(|m| names_project(m))
        .collect();
    if let Some(found) = deepest_containing(&containing, &segments) {
        return Some(found);
    }

    // A team project named in the path, in output order
    if let Some(found) = candidates.iter().copied().find(|m| names_project(m)) {
        return Some(found);
    }

    deepest_containing(candidates, &segments)
}

/// Mapping whose local folder is the longest prefix of `segments`; the first
/// one in output order wins ties. Segments compare ASCII case-insensitively.
fn deepest_containing<'a>(
    candidates: &[&'a WorkspaceMapping],
    segments: &[&str],
) -> Option<&'a WorkspaceMapping> {
    let mut best: Option<(&'a WorkspaceMapping, usize)> = None;
    for &mapping in candidates {
        let mapped = path_segments(&mapping.local_path);
        if mapped.is_empty() || !is_segment_prefix(&mapped, segments) {
            continue;
        }
        if best.is_none_or(|(_, depth)| mapped.len() > depth) {
            best = Some((mapping, mapped.len()));
        }
    }
    best.map(|(mapping, _)| mapping)
}

fn is_segment_prefix(prefix: &[&str], segments: &[&str]) -> bool {
    prefix.len() <= segments.len()
        && prefix
            .iter()
            .zip(segments)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

fn path_segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty()).collect()
}
