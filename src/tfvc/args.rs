use crate::shell::shell_quote;

/// Replacement shown in logs and messages for secret arguments.
pub const SECRET_MASK: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Argument {
    Plain(String),
    Secret(String),
}

/// Ordered argument list for a TF invocation.
///
/// Secret arguments (local paths, credentials) are passed to the process
/// verbatim but rendered as [`SECRET_MASK`] by [`ArgumentBuilder::display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentBuilder {
    command: String,
    args: Vec<Argument>,
}

impl ArgumentBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            args: Vec::new(),
        }
    }

    /// Add a switch such as `-noprompt`
    pub fn add_switch(mut self, switch: &str) -> Self {
        self.args.push(Argument::Plain(format!("-{}", switch)));
        self
    }

    pub fn add(mut self, arg: &str) -> Self {
        self.args.push(Argument::Plain(arg.to_string()));
        self
    }

    /// Add an argument that must never appear in logs
    pub fn add_secret(mut self, arg: &str) -> Self {
        self.args.push(Argument::Secret(arg.to_string()));
        self
    }

    /// Tokens handed to the process, command name first.
    pub fn args(&self) -> Vec<&str> {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(|arg| match arg {
                Argument::Plain(value) | Argument::Secret(value) => value.as_str(),
            }))
            .collect()
    }

    /// Single-line rendering with secrets masked.
    pub fn display(&self) -> String {
        std::iter::once(shell_quote(&self.command))
            .chain(self.args.iter().map(|arg| match arg {
                Argument::Plain(value) => shell_quote(value),
                Argument::Secret(_) => SECRET_MASK.to_string(),
            }))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
