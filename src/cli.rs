use crate::command;
use crate::command::parse::ParseArgs;
use crate::tfvc::CliVariant;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "tfwork")]
#[command(about = "Find the TFVC workspace that owns a local path")]
pub struct Cli {
    /// Mirror debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run `tf workfold` for a path and print its workspace
    Find {
        /// Local path inside the workspace (defaults to the current directory)
        path: Option<PathBuf>,

        /// Choose the default team project from the mapping matching the path
        #[arg(long)]
        restrict: bool,

        /// Output format of the TF executable (inferred from its file name if omitted)
        #[arg(long, value_enum)]
        variant: Option<CliVariant>,

        /// Path to the TF executable
        #[arg(long)]
        tf: Option<PathBuf>,

        /// Print the workspace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse captured `tf workfold` output
    Parse {
        /// File holding the captured stdout ("-" or omitted reads stdin)
        input: Option<PathBuf>,

        /// File holding the captured stderr
        #[arg(long)]
        stderr: Option<PathBuf>,

        /// Exit code the command returned
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        exit_code: i32,

        /// Local path the output was produced for (defaults to the current directory)
        #[arg(long)]
        path: Option<String>,

        /// Choose the default team project from the mapping matching the path
        #[arg(long)]
        restrict: bool,

        /// Output format to parse
        #[arg(long, value_enum)]
        variant: Option<CliVariant>,

        /// Print the workspace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Find {
            path,
            restrict,
            variant,
            tf,
            json,
        } => command::find::run(path.as_deref(), restrict, variant, tf.as_deref(), json),
        Commands::Parse {
            input,
            stderr,
            exit_code,
            path,
            restrict,
            variant,
            json,
        } => command::parse::run(ParseArgs {
            input: input.as_deref(),
            stderr: stderr.as_deref(),
            exit_code,
            path: path.as_deref(),
            restrict,
            variant,
            json,
        }),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tfwork", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_find_arguments() {
        let cli = Cli::try_parse_from([
            "tfwork", "find", "/src/web", "--restrict", "--variant", "exe", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Find {
                path,
                restrict,
                variant,
                tf,
                json,
            } => {
                assert_eq!(path, Some(PathBuf::from("/src/web")));
                assert!(restrict);
                assert_eq!(variant, Some(CliVariant::Exe));
                assert_eq!(tf, None);
                assert!(json);
            }
            _ => panic!("expected find"),
        }
    }

    #[test]
    fn parse_accepts_negative_exit_code() {
        let cli = Cli::try_parse_from(["tfwork", "-v", "parse", "--exit-code", "-1", "out.txt"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Parse {
                exit_code, input, ..
            } => {
                assert_eq!(exit_code, -1);
                assert_eq!(input, Some(PathBuf::from("out.txt")));
            }
            _ => panic!("expected parse"),
        }
    }
}
