use std::sync::Arc;
use tracing::debug;

use super::args::{ArgumentBuilder, SECRET_MASK};
use super::error::{TfvcError, TfvcErrorCode};
use super::parser::{self, OutputFormat, ParseRequest};
use super::strings::{DefaultCatalog, MessageCatalog};
use super::workspace::Workspace;
use super::{CliVariant, ExecutionResult};

/// Process options for a TF invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOptions {
    pub cwd: String,
}

/// `tf workfold -noprompt <localPath>`: find the workspace that owns a local path.
///
/// With `restrict_workspace` set, the default team project is chosen from the
/// mapping that matches the local path rather than the first mapping.
#[derive(Clone)]
pub struct FindWorkspace {
    local_path: String,
    restrict_workspace: bool,
    catalog: Arc<dyn MessageCatalog>,
}

impl std::fmt::Debug for FindWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FindWorkspace")
            .field("local_path", &SECRET_MASK)
            .field("restrict_workspace", &self.restrict_workspace)
            .finish_non_exhaustive()
    }
}

impl FindWorkspace {
    pub fn new(local_path: &str, restrict_workspace: bool) -> Result<Self, TfvcError> {
        Self::with_catalog(local_path, restrict_workspace, Arc::new(DefaultCatalog))
    }

    pub fn with_catalog(
        local_path: &str,
        restrict_workspace: bool,
        catalog: Arc<dyn MessageCatalog>,
    ) -> Result<Self, TfvcError> {
        if local_path.trim().is_empty() {
            return Err(TfvcError::new(
                TfvcErrorCode::ArgumentRequired,
                catalog.as_ref(),
                Some("localPath"),
            ));
        }
        Ok(Self {
            local_path: local_path.to_string(),
            restrict_workspace,
            catalog,
        })
    }

    pub fn restrict_workspace(&self) -> bool {
        self.restrict_workspace
    }

    pub fn arguments(&self) -> ArgumentBuilder {
        ArgumentBuilder::new("workfold")
            .add_switch("noprompt")
            .add_secret(&self.local_path)
    }

    pub fn options(&self) -> CommandOptions {
        CommandOptions {
            cwd: self.local_path.clone(),
        }
    }

    /// tf.exe takes the same arguments as the CLC.
    pub fn exe_arguments(&self) -> ArgumentBuilder {
        self.arguments()
    }

    pub fn exe_options(&self) -> CommandOptions {
        self.options()
    }

    pub fn arguments_for(&self, variant: CliVariant) -> ArgumentBuilder {
        match variant {
            CliVariant::Clc => self.arguments(),
            CliVariant::Exe => self.exe_arguments(),
        }
    }

    pub fn options_for(&self, variant: CliVariant) -> CommandOptions {
        match variant {
            CliVariant::Clc => self.options(),
            CliVariant::Exe => self.exe_options(),
        }
    }

    /// Parse output of the cross-platform client.
    pub fn parse_output(&self, result: &ExecutionResult) -> Result<Option<Workspace>, TfvcError> {
        self.parse_with(OutputFormat::for_variant(CliVariant::Clc), result)
    }

    /// Parse output of `tf.exe`.
    pub fn parse_exe_output(
        &self,
        result: &ExecutionResult,
    ) -> Result<Option<Workspace>, TfvcError> {
        self.parse_with(OutputFormat::for_variant(CliVariant::Exe), result)
    }

    pub fn parse_output_for(
        &self,
        variant: CliVariant,
        result: &ExecutionResult,
    ) -> Result<Option<Workspace>, TfvcError> {
        match variant {
            CliVariant::Clc => self.parse_output(result),
            CliVariant::Exe => self.parse_exe_output(result),
        }
    }

    fn parse_with(
        &self,
        format: &OutputFormat,
        result: &ExecutionResult,
    ) -> Result<Option<Workspace>, TfvcError> {
        debug!(
            variant = ?format.variant,
            exit_code = result.exit_code,
            restrict = self.restrict_workspace,
            "tfvc:find workspace parse"
        );
        let request = ParseRequest {
            local_path: &self.local_path,
            restrict_workspace: self.restrict_workspace,
            catalog: self.catalog.as_ref(),
        };
        parser::parse(format, result, &request)
    }
}
