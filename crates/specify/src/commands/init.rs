//! Init command
//!
//! Resolves the assistant and script flavor, provisions the project from the
//! latest template release, and initializes git. Progress is shown as a live
//! step tree; on failure a fresh project directory is removed again.

use std::io::IsTerminal;

use anyhow::{anyhow, bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use console::{style, Color};
use dialoguer::{Confirm, Select};
use specify_core::types::{Assistant, GitWorkflowConfig, ScriptType, ASSISTANTS};
use specify_core::{CancelFlag, ConfigLoader, StepStatus, StepTracker};
use specify_projects::git::{init_repository, is_git_repo};
use specify_projects::tools::is_command_available;
use specify_template::{
    provision, resolve_token, ProvisionOutcome, ProvisionRequest, TargetLayout, TemplateClient,
};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cli::InitArgs;
use crate::live::LiveTree;
use crate::output;

/// Steps registered up front so the tree shows the whole plan
const PLANNED_STEPS: &[(&str, &str)] = &[
    ("fetch", "Fetch latest release"),
    ("download", "Download template"),
    ("extract", "Extract template"),
    ("zip-list", "Archive contents"),
    ("extracted-summary", "Extraction summary"),
    ("chmod", "Ensure scripts executable"),
    ("cleanup", "Cleanup"),
    ("git", "Initialize git repository"),
    ("final", "Finalize"),
];

/// Where the project is created
#[derive(Debug, Clone, PartialEq, Eq)]
enum ProjectTarget {
    /// New directory below the current one
    Named(String),
    /// The current directory itself
    Here,
}

pub async fn run(args: InitArgs) -> Result<()> {
    let target = resolve_target(&args)?;
    let cwd = Utf8PathBuf::from_path_buf(std::env::current_dir()?)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))?;

    let (project_path, layout, project_name) = match &target {
        ProjectTarget::Here => (
            cwd.clone(),
            TargetLayout::Merge,
            cwd.file_name().unwrap_or(".").to_string(),
        ),
        ProjectTarget::Named(name) => (cwd.join(name), TargetLayout::Fresh, name.clone()),
    };

    match &target {
        ProjectTarget::Here => {
            if !confirm_merge(&project_path, args.force)? {
                output::info("Operation cancelled");
                return Ok(());
            }
        }
        ProjectTarget::Named(name) => {
            if project_path.exists() {
                bail!(
                    "Directory '{}' already exists. Choose a different project name or remove the existing directory",
                    name
                );
            }
        }
    }

    let config = ConfigLoader::new()
        .context("Failed to create config loader")?
        .load_runtime_config()
        .context("Failed to load runtime config")?;

    output::header("Specify Project Setup");
    output::kv("Project", &project_name);
    output::kv("Working path", cwd.as_str());
    if target != ProjectTarget::Here {
        output::kv("Target path", project_path.as_str());
    }

    let git_available = !args.no_git && is_command_available("git");
    if !args.no_git && !git_available {
        output::warning("Git not found - repository initialization will be skipped");
    }

    let assistant = match args.ai.as_deref() {
        Some(key) => Assistant::parse(key)?,
        None => select_assistant()?,
    };
    if !args.ignore_agent_tools {
        check_agent_tool(assistant)?;
    }
    let script = match args.script.as_deref() {
        Some(key) => key.parse::<ScriptType>()?,
        None => select_script()?,
    };

    output::kv("AI assistant", assistant.key);
    output::kv("Script type", script.key());
    println!();

    let mut tracker = StepTracker::new("Initialize Specify Project");
    tracker.add("precheck", "Check required tools");
    tracker.complete("precheck", "ok");
    tracker.add("ai-select", "Select AI assistant");
    tracker.complete("ai-select", assistant.key);
    tracker.add("script-select", "Select script type");
    tracker.complete("script-select", script.key());
    for (key, label) in PLANNED_STEPS {
        tracker.add(key, label);
    }

    let token = resolve_token(args.github_token.as_deref());
    let client = TemplateClient::new(&config, args.skip_tls, token)?;
    debug!(
        "Release endpoint {} ({})",
        client.release_url(),
        if client.is_authenticated() { "authenticated" } else { "anonymous" }
    );
    let request = ProvisionRequest::new(
        assistant.key,
        script,
        project_path.as_std_path(),
        layout,
        &config.template,
    );

    let cancel = CancelFlag::new();
    let watcher = spawn_interrupt_watcher(cancel.clone());
    let live = LiveTree::attach(&mut tracker);

    let result = tokio::select! {
        result = provision(&client, &request, &mut tracker, &cancel) => result,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            Err(specify_template::Error::Cancelled)
        }
    };

    let result = match result {
        Ok(outcome) => {
            run_git_step(
                &args,
                git_available,
                &project_path,
                &config.git_workflow,
                &mut tracker,
            )
            .await;
            tracker.complete("final", "project ready");
            Ok(outcome)
        }
        Err(e) => {
            if matches!(e, specify_template::Error::Cancelled) {
                mark_interrupted(&mut tracker);
            }
            tracker.error("final", &e.to_string());
            Err(e)
        }
    };

    live.finish(&mut tracker);
    watcher.abort();
    println!("{}", tracker.render());

    match result {
        Ok(outcome) => {
            for failure in &outcome.fixups.failures {
                output::warning(&format!(
                    "Could not make {} executable: {}",
                    failure.path.display(),
                    failure.message
                ));
            }
            print_success(&target, &project_name, &project_path, assistant, &outcome);
            Ok(())
        }
        Err(e) => {
            output::panel(
                "Failure",
                &format!("Initialization failed: {}", e),
                Color::Red,
            );
            if args.debug {
                if let Some(details) = e.diagnostics() {
                    output::panel("Error Details", &details, Color::Red);
                }
                output::panel("Debug Environment", &environment_summary(&cwd), Color::Magenta);
            } else if e.diagnostics().is_some() {
                output::info("Re-run with --debug for more detail");
            }

            let created_here = !matches!(e, specify_template::Error::TargetExists { .. });
            if layout == TargetLayout::Fresh && created_here && project_path.exists() {
                debug!("Removing {}", project_path);
                if let Err(rm) = std::fs::remove_dir_all(&project_path) {
                    output::error(&format!("Failed to remove {}: {}", project_path, rm));
                }
            }
            std::process::exit(1);
        }
    }
}

fn resolve_target(args: &InitArgs) -> Result<ProjectTarget> {
    let dot = args.project_name.as_deref() == Some(".");
    match (&args.project_name, args.here || dot) {
        (Some(_), true) if !dot => bail!("Cannot specify both a project name and --here"),
        (_, true) => Ok(ProjectTarget::Here),
        (Some(name), false) if name.trim().is_empty() => bail!("Project name must not be empty"),
        (Some(name), false) => Ok(ProjectTarget::Named(name.clone())),
        (None, false) => bail!(
            "Specify a project name, use '.' for the current directory, or pass --here"
        ),
    }
}

/// Warn about merging into a non-empty directory and ask unless forced
fn confirm_merge(path: &Utf8Path, force: bool) -> Result<bool> {
    let count = std::fs::read_dir(path)
        .with_context(|| format!("Failed to read {}", path))?
        .count();
    if count == 0 {
        return Ok(true);
    }

    output::warning(&format!("Current directory is not empty ({} items)", count));
    output::warning(
        "Template files will be merged with existing content and may overwrite existing files",
    );

    if force {
        output::info("--force supplied: skipping confirmation and proceeding with merge");
        return Ok(true);
    }

    Ok(Confirm::new()
        .with_prompt("Do you want to continue?")
        .default(false)
        .interact()?)
}

fn select_assistant() -> Result<&'static Assistant> {
    let default = ASSISTANTS
        .iter()
        .position(|a| a.key == "copilot")
        .unwrap_or(0);
    if !std::io::stdin().is_terminal() {
        return Ok(&ASSISTANTS[default]);
    }

    let items: Vec<String> = ASSISTANTS
        .iter()
        .map(|a| format!("{} ({})", a.key, a.name))
        .collect();
    let selection = Select::new()
        .with_prompt("Choose your AI assistant")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(&ASSISTANTS[selection])
}

fn select_script() -> Result<ScriptType> {
    let default_script = ScriptType::platform_default();
    if !std::io::stdin().is_terminal() {
        return Ok(default_script);
    }

    let items: Vec<String> = ScriptType::ALL
        .iter()
        .map(|s| format!("{} ({})", s.key(), s.description()))
        .collect();
    let default = ScriptType::ALL
        .iter()
        .position(|s| *s == default_script)
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Choose script type")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(ScriptType::ALL[selection])
}

fn check_agent_tool(assistant: &Assistant) -> Result<()> {
    let Some(command) = assistant.command else {
        return Ok(());
    };
    if is_command_available(command) {
        return Ok(());
    }

    let mut body = format!(
        "{} is required for {} projects.",
        style(command).cyan(),
        assistant.name
    );
    if let Some(url) = assistant.install_url {
        body.push_str(&format!("\nInstall from: {}", style(url).cyan()));
    }
    body.push_str("\n\nTip: Use --ignore-agent-tools to skip this check");
    output::panel("Agent Detection Error", &body, Color::Red);

    bail!("{} not found", command)
}

/// Set the flag on Ctrl-C so blocking stages can stop at their next check
fn spawn_interrupt_watcher(cancel: CancelFlag) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    })
}

async fn run_git_step(
    args: &InitArgs,
    git_available: bool,
    project_path: &Utf8Path,
    git_config: &GitWorkflowConfig,
    tracker: &mut StepTracker,
) {
    if args.no_git {
        tracker.skip("git", "--no-git flag");
        return;
    }

    tracker.start("git", "");
    if is_git_repo(project_path).await {
        tracker.complete("git", "existing repo detected");
    } else if !git_available {
        tracker.skip("git", "git not available");
    } else {
        match init_repository(project_path, git_config).await {
            Ok(()) => tracker.complete("git", "initialized"),
            Err(e) => {
                debug!("Git initialization failed: {}", e);
                tracker.error("git", &git_failure_detail(&e.to_string()));
            }
        }
    }
}

/// Short reason for the `git` step: the first line of the failure
fn git_failure_detail(message: &str) -> String {
    let first = message.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if first.is_empty() {
        "init failed".to_string()
    } else {
        format!("init failed: {}", first.trim())
    }
}

/// Mark steps left running by an interrupt as failed
fn mark_interrupted(tracker: &mut StepTracker) {
    let running: Vec<String> = tracker
        .steps()
        .iter()
        .filter(|step| step.status == StepStatus::Running)
        .map(|step| step.key.clone())
        .collect();
    for key in running {
        tracker.error(&key, "interrupted");
    }
}

fn environment_summary(cwd: &Utf8Path) -> String {
    output::aligned_pairs(&[
        ("Specify", env!("CARGO_PKG_VERSION").to_string()),
        (
            "Platform",
            format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        ),
        ("CWD", cwd.to_string()),
    ])
}

fn print_success(
    target: &ProjectTarget,
    project_name: &str,
    project_path: &Utf8Path,
    assistant: &Assistant,
    outcome: &ProvisionOutcome,
) {
    println!();
    output::success(&format!(
        "Project ready ({} from {}).",
        outcome.asset.name, outcome.release_tag
    ));

    output::panel(
        "Agent Folder Security",
        &format!(
            "Some agents may store credentials, auth tokens, or other identifying and private artifacts in the agent folder within your project.\nConsider adding {} (or parts of it) to {} to prevent accidental credential leakage.",
            style(assistant.folder).cyan(),
            style(".gitignore").cyan()
        ),
        Color::Yellow,
    );

    output::panel(
        "Next Steps",
        &next_steps(target, project_name, project_path, assistant.key).join("\n"),
        Color::Cyan,
    );

    output::panel(
        "Enhancement Commands",
        &[
            format!(
                "Optional commands for your specs {}",
                style("(improve quality & confidence)").black().bright()
            ),
            String::new(),
            format!(
                "○ {} {} - Ask structured questions to de-risk ambiguous areas before planning",
                style("/clarify").cyan(),
                style("(optional)").black().bright()
            ),
            format!(
                "○ {} {} - Cross-artifact consistency & alignment report",
                style("/analyze").cyan(),
                style("(optional)").black().bright()
            ),
        ]
        .join("\n"),
        Color::Cyan,
    );

    if assistant.key == "codex" {
        output::panel(
            "Slash Commands in Codex",
            &format!(
                "{}\n\nCustom prompts in Codex do not support arguments yet. You may need to put\nextra project instructions directly into the prompt files under {}.\n\nMore information: {}",
                style("Important note:").yellow().bold(),
                style(".codex/prompts/").cyan(),
                style("https://github.com/openai/codex/issues/2890").cyan()
            ),
            Color::Yellow,
        );
    }
}

/// Numbered "next steps" lines
fn next_steps(
    target: &ProjectTarget,
    project_name: &str,
    project_path: &Utf8Path,
    assistant_key: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    match target {
        ProjectTarget::Here => lines.push("1. You're already in the project directory!".to_string()),
        ProjectTarget::Named(_) => lines.push(format!(
            "1. Go to the project folder: {}",
            style(format!("cd {}", project_name)).cyan()
        )),
    }
    let mut step = 2;

    if assistant_key == "codex" {
        let codex_home = project_path.join(".codex");
        let cmd = if cfg!(windows) {
            format!("setx CODEX_HOME \"{}\"", codex_home)
        } else {
            format!("export CODEX_HOME='{}'", codex_home)
        };
        lines.push(format!(
            "{}. Set the {} environment variable before running Codex: {}",
            step,
            style("CODEX_HOME").cyan(),
            style(cmd).cyan()
        ));
        step += 1;
    }

    lines.push(format!(
        "{}. Start using slash commands with your AI agent:",
        step
    ));
    for (i, (command, what)) in [
        ("/constitution", "Establish project principles"),
        ("/specify", "Create the specification"),
        ("/clarify", "Clarify and de-risk the specification (run before /plan)"),
        ("/plan", "Create the implementation plan"),
        ("/tasks", "Generate actionable tasks"),
        ("/analyze", "Check consistency and find mismatches (read-only)"),
        ("/implement", "Execute the implementation"),
    ]
    .iter()
    .enumerate()
    {
        lines.push(format!(
            "   {}.{} {} - {}",
            step,
            i + 1,
            style(command).cyan(),
            what
        ));
    }

    lines
}
