//! Check command

use anyhow::Result;
use specify_core::StepTracker;
use specify_projects::tools::{is_command_available, CHECKED_TOOLS};

use crate::output;

pub fn run() -> Result<()> {
    output::info("Checking for installed tools...");

    let mut tracker = StepTracker::new("Check Available Tools");
    for tool in CHECKED_TOOLS {
        tracker.add(tool.command, tool.label);
    }

    let mut found = Vec::new();
    for tool in CHECKED_TOOLS {
        if is_command_available(tool.command) {
            tracker.complete(tool.command, "available");
            found.push(tool.command);
        } else {
            tracker.error(tool.command, "not found");
        }
    }

    println!();
    println!("{}", tracker.render());
    println!();
    output::success("Specify CLI is ready to use!");

    for tip in tips(&found) {
        output::info(tip);
    }

    Ok(())
}

/// Hints for a set of installed tools
fn tips(found: &[&str]) -> Vec<&'static str> {
    let mut tips = Vec::new();
    if !found.contains(&"git") {
        tips.push("Tip: Install git for repository management");
    }
    if !found.iter().any(|c| *c != "git") {
        tips.push("Tip: Install an AI assistant for the best experience");
    }
    tips
}
