//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};

/// Specify - set up spec-driven development projects
#[derive(Parser, Debug)]
#[command(name = "specify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Specify project from the latest template
    Init(InitArgs),

    /// Check that required tools are installed
    Check,

    /// Show version information
    Version(VersionArgs),
}

// Init command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Name of the new project directory ("." for the current directory)
    pub project_name: Option<String>,

    /// AI assistant to use (copilot, claude, gemini, cursor, qwen, opencode, codex, windsurf, kilocode, auggie, roo)
    #[arg(long)]
    pub ai: Option<String>,

    /// Script type to use (sh or ps)
    #[arg(long)]
    pub script: Option<String>,

    /// Skip checks for AI agent tools like Claude Code
    #[arg(long)]
    pub ignore_agent_tools: bool,

    /// Skip git repository initialization
    #[arg(long)]
    pub no_git: bool,

    /// Initialize the project in the current directory
    #[arg(long)]
    pub here: bool,

    /// Merge into a non-empty current directory without asking (with --here)
    #[arg(long)]
    pub force: bool,

    /// Skip SSL/TLS verification (not recommended)
    #[arg(long)]
    pub skip_tls: bool,

    /// Show verbose diagnostics for network and extraction failures
    #[arg(long)]
    pub debug: bool,

    /// GitHub token for API requests (defaults to GH_TOKEN or GITHUB_TOKEN)
    #[arg(long)]
    pub github_token: Option<String>,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_init_flags() {
        let cli = Cli::try_parse_from([
            "specify",
            "init",
            "my-project",
            "--ai",
            "claude",
            "--script",
            "sh",
            "--no-git",
            "--skip-tls",
            "--github-token",
            "abc",
        ])
        .unwrap();

        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.project_name.as_deref(), Some("my-project"));
                assert_eq!(args.ai.as_deref(), Some("claude"));
                assert_eq!(args.script.as_deref(), Some("sh"));
                assert!(args.no_git);
                assert!(args.skip_tls);
                assert!(!args.here);
                assert_eq!(args.github_token.as_deref(), Some("abc"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_verbosity() {
        let cli = Cli::try_parse_from(["specify", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_parse_version_json() {
        let cli = Cli::try_parse_from(["specify", "version", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Version(VersionArgs { json: true })));
    }
}
