//! Version command

use anyhow::Result;
use serde::Serialize;
use specify_core::types::ScriptType;
use specify_core::ConfigLoader;

use crate::cli::VersionArgs;

/// Build and template-source information
#[derive(Debug, Clone, Serialize)]
struct VersionInfo {
    version: String,
    commit: Option<String>,
    target: Option<String>,
    /// `owner/repo` the templates are fetched from
    template_source: Option<String>,
    /// Script flavor offered by default on this platform
    default_script: &'static str,
}

impl VersionInfo {
    fn current() -> Self {
        let template_source = ConfigLoader::new()
            .and_then(|loader| loader.load_runtime_config())
            .map(|config| format!("{}/{}", config.github.repo_owner, config.github.repo_name))
            .ok();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            target: option_env!("TARGET").map(String::from),
            template_source,
            default_script: ScriptType::platform_default().key(),
        }
    }

    /// One-line summary, e.g. `specify 0.1.0 (abc1234) x86_64-unknown-linux-gnu`
    fn headline(&self) -> String {
        let mut line = format!("specify {}", self.version);
        if let Some(commit) = &self.commit {
            line.push_str(&format!(" ({})", commit));
        }
        if let Some(target) = &self.target {
            line.push(' ');
            line.push_str(target);
        }
        line
    }
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", info.headline());
    if let Some(source) = &info.template_source {
        println!("Templates:  {}", source);
    }
    println!("Scripts:    {}", info.default_script);

    Ok(())
}
