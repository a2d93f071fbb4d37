//! Resolve the TFVC workspace that owns a local path.
//!
//! [`tfvc::FindWorkspace`] builds the `tf workfold -noprompt <path>` invocation
//! and turns its captured output into a [`tfvc::Workspace`] or a classified
//! [`tfvc::TfvcError`], for both the cross-platform client and `tf.exe`.

pub mod cli;
pub mod cmd;
mod command;
pub mod config;
pub mod logger;
mod shell;
pub mod tfvc;
