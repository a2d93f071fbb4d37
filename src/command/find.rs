use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::cmd::Cmd;
use crate::config::Config;
use crate::tfvc::{CliVariant, FindWorkspace};

pub fn run(
    path: Option<&Path>,
    restrict: bool,
    variant: Option<CliVariant>,
    tf: Option<&Path>,
    json: bool,
) -> Result<()> {
    let local_path = absolute_path(path)?;
    let config = Config::load(&local_path)?;
    let tf_path = config.tf_path(tf)?;
    let variant = config.variant(variant, &tf_path);
    let restrict = restrict || config.restrict_workspace();

    let command = FindWorkspace::with_catalog(
        &local_path.to_string_lossy(),
        restrict,
        config.catalog(),
    )?;
    let args = command.arguments_for(variant);
    let options = command.options_for(variant);

    info!(
        tf = %tf_path.display(),
        ?variant,
        args = %args.display(),
        restrict = command.restrict_workspace(),
        "find:running workfold"
    );
    let result = Cmd::new(&tf_path)
        .args(&args)
        .workdir(Path::new(&options.cwd))
        .execute()?;

    let workspace = command
        .parse_output_for(variant, &result)
        .inspect_err(|err| warn!(code = ?err.code(), "find:workfold output rejected"))?;
    super::print_workspace(workspace.as_ref(), json)
}

/// Relative paths are taken from the current directory; none means the current directory.
fn absolute_path(path: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(match path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_keeps_absolute_input() {
        let path = absolute_path(Some(Path::new("/src/web"))).unwrap();
        assert_eq!(path, PathBuf::from("/src/web"));
    }

    #[test]
    fn absolute_path_joins_relative_input() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path(Some(Path::new("web"))).unwrap(), cwd.join("web"));
        assert_eq!(absolute_path(None).unwrap(), cwd);
    }
}
