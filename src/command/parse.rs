use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::tfvc::{CliVariant, ExecutionResult, FindWorkspace};

/// Options for parsing captured `tf workfold` output without running TF.
pub struct ParseArgs<'a> {
    /// File holding stdout; `None` or `-` reads stdin
    pub input: Option<&'a Path>,
    pub stderr: Option<&'a Path>,
    pub exit_code: i32,
    /// Local path the output was produced for (defaults to the current directory)
    pub path: Option<&'a str>,
    pub restrict: bool,
    pub variant: Option<CliVariant>,
    pub json: bool,
}

pub fn run(args: ParseArgs<'_>) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config = Config::load(&cwd)?;

    let local_path = match args.path {
        Some(path) => path.to_string(),
        None => cwd.to_string_lossy().into_owned(),
    };
    let variant = args.variant.or(config.variant).unwrap_or_default();
    let restrict = args.restrict || config.restrict_workspace();

    let result = ExecutionResult {
        exit_code: args.exit_code,
        stdout: read_input(args.input)?,
        stderr: args.stderr.map(read_file).transpose()?.flatten(),
    };

    info!(?variant, exit_code = args.exit_code, "parse:captured output");
    let command = FindWorkspace::with_catalog(&local_path, restrict, config.catalog())?;
    let workspace = command
        .parse_output_for(variant, &result)
        .inspect_err(|err| warn!(code = ?err.code(), "parse:output rejected"))?;
    super::print_workspace(workspace.as_ref(), args.json)
}

fn read_input(input: Option<&Path>) -> Result<Option<String>> {
    match input {
        Some(path) if path != Path::new("-") => read_file(path),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read output from stdin")?;
            Ok(non_empty(buffer))
        }
    }
}

fn read_file(path: &Path) -> Result<Option<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(non_empty(contents))
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_file_treats_blank_file_as_absent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stderr.txt");
        fs::write(&path, "\n  \n").unwrap();
        assert_eq!(read_file(&path).unwrap(), None);
    }

    #[test]
    fn read_file_returns_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stdout.txt");
        fs::write(&path, "Workspace: w\n$/p: /p\n").unwrap();
        assert_eq!(
            read_file(&path).unwrap().as_deref(),
            Some("Workspace: w\n$/p: /p\n")
        );
    }

    #[test]
    fn read_file_missing_reports_path() {
        let err = read_file(Path::new("/nonexistent/tfwork/out.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tfwork/out.txt"));
    }
}
