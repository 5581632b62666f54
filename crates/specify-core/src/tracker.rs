//! Hierarchical step tracking for long-running operations
//!
//! A [`StepTracker`] holds an ordered list of named steps and renders them as
//! a tree. An optional refresh callback is invoked after every mutation so a
//! caller can redraw a live view. The callback runs synchronously on the
//! caller's thread, so mutation and rendering are strictly ordered.
//!
//! Status-setting calls on a key that was never added register the step on
//! the fly (labelled with its key). Callers rely on this to report sub-steps
//! that are only discovered while work is under way.

use std::fmt;
use std::io;

use console::style;
use tracing::debug;

/// Status of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Error,
    Skipped,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Pending => "pending",
            StepStatus::Running => "running",
            StepStatus::Done => "done",
            StepStatus::Error => "error",
            StepStatus::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// A tracked step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub key: String,
    pub label: String,
    pub status: StepStatus,
    pub detail: String,
}

/// Callback invoked after every tracker mutation
///
/// Errors are logged and dropped; a failing renderer never interrupts the
/// operation being tracked.
pub type RefreshCallback = Box<dyn FnMut(&StepTracker) -> io::Result<()> + Send>;

/// Ordered collection of steps with optional live refresh
pub struct StepTracker {
    title: String,
    steps: Vec<Step>,
    refresh: Option<RefreshCallback>,
}

impl fmt::Debug for StepTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepTracker")
            .field("title", &self.title)
            .field("steps", &self.steps)
            .field("refresh", &self.refresh.is_some())
            .finish()
    }
}

impl StepTracker {
    /// Create an empty tracker
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
            refresh: None,
        }
    }

    /// Attach the refresh callback, replacing any previous one
    pub fn attach_refresh(&mut self, callback: RefreshCallback) {
        self.refresh = Some(callback);
    }

    /// Remove the refresh callback
    pub fn detach_refresh(&mut self) {
        self.refresh = None;
    }

    /// Tracker title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Steps in insertion order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Look up a step by key
    pub fn get(&self, key: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.key == key)
    }

    /// Status of a step, if registered
    pub fn status(&self, key: &str) -> Option<StepStatus> {
        self.get(key).map(|s| s.status)
    }

    /// Register a pending step; a key that is already present is left untouched
    pub fn add(&mut self, key: &str, label: &str) {
        if self.get(key).is_some() {
            return;
        }
        self.steps.push(Step {
            key: key.to_string(),
            label: label.to_string(),
            status: StepStatus::Pending,
            detail: String::new(),
        });
        self.refresh();
    }

    /// Mark a step as running
    pub fn start(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Running, detail);
    }

    /// Mark a step as done
    pub fn complete(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Done, detail);
    }

    /// Mark a step as failed
    pub fn error(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Error, detail);
    }

    /// Mark a step as skipped
    pub fn skip(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Skipped, detail);
    }

    fn update(&mut self, key: &str, status: StepStatus, detail: &str) {
        match self.steps.iter_mut().find(|s| s.key == key) {
            Some(step) => {
                step.status = status;
                // An empty detail never wipes an existing one
                if !detail.is_empty() {
                    step.detail = detail.to_string();
                }
            }
            None => self.steps.push(Step {
                key: key.to_string(),
                label: key.to_string(),
                status,
                detail: detail.to_string(),
            }),
        }
        self.refresh();
    }

    /// Invoke the refresh callback with the current state
    pub fn refresh(&mut self) {
        let Some(mut callback) = self.refresh.take() else {
            return;
        };
        if let Err(e) = callback(self) {
            debug!("Tracker refresh failed: {}", e);
        }
        // The callback may have attached a replacement; keep the newest one
        if self.refresh.is_none() {
            self.refresh = Some(callback);
        }
    }

    /// Render the tracker as a styled tree, one line per step
    pub fn render(&self) -> String {
        let mut out = style(&self.title).cyan().to_string();
        let last = self.steps.len().saturating_sub(1);

        for (i, step) in self.steps.iter().enumerate() {
            let guide = if i == last { "└── " } else { "├── " };
            out.push('\n');
            out.push_str(&style(guide).dim().to_string());
            out.push_str(&render_line(step));
        }

        out
    }
}

fn render_line(step: &Step) -> String {
    let detail = step.detail.trim();

    let symbol = match step.status {
        StepStatus::Done => style("●").green(),
        StepStatus::Pending => style("○").green().dim(),
        StepStatus::Running => style("○").cyan(),
        StepStatus::Error => style("●").red(),
        StepStatus::Skipped => style("○").yellow(),
    };

    if step.status == StepStatus::Pending {
        let text = if detail.is_empty() {
            step.label.clone()
        } else {
            format!("{} ({})", step.label, detail)
        };
        return format!("{} {}", symbol, style(text).black().bright());
    }

    if detail.is_empty() {
        format!("{} {}", symbol, style(&step.label).white())
    } else {
        format!(
            "{} {} {}",
            symbol,
            style(&step.label).white(),
            style(format!("({})", detail)).black().bright()
        )
    }
}
