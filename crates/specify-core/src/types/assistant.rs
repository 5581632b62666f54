//! Assistant and script-flavor catalogue

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An AI assistant a template can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assistant {
    /// Identifier used in asset names and on the command line
    pub key: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Executable that must be present, when the assistant ships a CLI
    pub command: Option<&'static str>,
    /// Where to get the CLI
    pub install_url: Option<&'static str>,
    /// Folder inside the project where the assistant keeps its files
    pub folder: &'static str,
}

/// All supported assistants, in menu order
pub const ASSISTANTS: &[Assistant] = &[
    Assistant {
        key: "copilot",
        name: "GitHub Copilot",
        command: None,
        install_url: None,
        folder: ".github/",
    },
    Assistant {
        key: "claude",
        name: "Claude Code",
        command: Some("claude"),
        install_url: Some("https://docs.anthropic.com/en/docs/claude-code/setup"),
        folder: ".claude/",
    },
    Assistant {
        key: "gemini",
        name: "Gemini CLI",
        command: Some("gemini"),
        install_url: Some("https://github.com/google-gemini/gemini-cli"),
        folder: ".gemini/",
    },
    Assistant {
        key: "cursor",
        name: "Cursor",
        command: None,
        install_url: None,
        folder: ".cursor/",
    },
    Assistant {
        key: "qwen",
        name: "Qwen Code",
        command: Some("qwen"),
        install_url: Some("https://github.com/QwenLM/qwen-code"),
        folder: ".qwen/",
    },
    Assistant {
        key: "opencode",
        name: "opencode",
        command: Some("opencode"),
        install_url: Some("https://opencode.ai"),
        folder: ".opencode/",
    },
    Assistant {
        key: "codex",
        name: "Codex CLI",
        command: Some("codex"),
        install_url: Some("https://github.com/openai/codex"),
        folder: ".codex/",
    },
    Assistant {
        key: "windsurf",
        name: "Windsurf",
        command: None,
        install_url: None,
        folder: ".windsurf/",
    },
    Assistant {
        key: "kilocode",
        name: "Kilo Code",
        command: None,
        install_url: None,
        folder: ".kilocode/",
    },
    Assistant {
        key: "auggie",
        name: "Auggie CLI",
        command: Some("auggie"),
        install_url: Some("https://docs.augmentcode.com/cli/setup-auggie/install-auggie-cli"),
        folder: ".augment/",
    },
    Assistant {
        key: "roo",
        name: "Roo Code",
        command: None,
        install_url: None,
        folder: ".roo/",
    },
];

impl Assistant {
    /// Look up an assistant by key
    pub fn find(key: &str) -> Option<&'static Assistant> {
        ASSISTANTS.iter().find(|a| a.key == key)
    }

    /// Look up an assistant by key, failing with the list of valid keys
    pub fn parse(key: &str) -> Result<&'static Assistant, Error> {
        Self::find(key).ok_or_else(|| Error::unknown_assistant(key, Self::available()))
    }

    /// Comma-separated list of valid keys
    pub fn available() -> String {
        ASSISTANTS
            .iter()
            .map(|a| a.key)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Script packaging shipped inside the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptType {
    /// POSIX shell (bash/zsh)
    Sh,
    /// PowerShell
    Ps,
}

impl ScriptType {
    /// All flavors, in menu order
    pub const ALL: [ScriptType; 2] = [ScriptType::Sh, ScriptType::Ps];

    /// Identifier used in asset names
    pub fn key(&self) -> &'static str {
        match self {
            ScriptType::Sh => "sh",
            ScriptType::Ps => "ps",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ScriptType::Sh => "POSIX Shell (bash/zsh)",
            ScriptType::Ps => "PowerShell",
        }
    }

    /// Flavor that matches the host platform
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            ScriptType::Ps
        } else {
            ScriptType::Sh
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScriptType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sh" => Ok(ScriptType::Sh),
            "ps" => Ok(ScriptType::Ps),
            other => Err(Error::unknown_script_type(other, "sh, ps")),
        }
    }
}
