//! Installed-tool discovery

use std::path::PathBuf;

use tracing::debug;

/// A tool reported by `specify check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Executable name
    pub command: &'static str,
    /// Display label
    pub label: &'static str,
}

/// Tools reported by `specify check`, in display order
pub const CHECKED_TOOLS: &[Tool] = &[
    Tool { command: "git", label: "Git version control" },
    Tool { command: "claude", label: "Claude Code CLI" },
    Tool { command: "gemini", label: "Gemini CLI" },
    Tool { command: "qwen", label: "Qwen Code CLI" },
    Tool { command: "code", label: "Visual Studio Code" },
    Tool { command: "code-insiders", label: "Visual Studio Code Insiders" },
    Tool { command: "cursor-agent", label: "Cursor IDE agent" },
    Tool { command: "windsurf", label: "Windsurf IDE" },
    Tool { command: "kilocode", label: "Kilo Code IDE" },
    Tool { command: "opencode", label: "opencode" },
    Tool { command: "codex", label: "Codex CLI" },
    Tool { command: "auggie", label: "Auggie CLI" },
];

/// Location of the Claude CLI after `claude migrate-installer`
///
/// The migration removes `claude` from PATH and installs it here instead.
pub fn claude_local_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".claude").join("local").join("claude"))
}

/// Whether an executable named `name` can be run
pub fn is_command_available(name: &str) -> bool {
    if name == "claude" {
        if let Some(local) = claude_local_path() {
            if local.is_file() {
                debug!("Found claude at {}", local.display());
                return true;
            }
        }
    }

    match which::which(name) {
        Ok(path) => {
            debug!("Found {} at {}", name, path.display());
            true
        }
        Err(_) => false,
    }
}
