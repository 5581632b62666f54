//! Live redraw of a step tracker on stderr
//!
//! Each tracker mutation clears the previously drawn tree and writes the new
//! one. When stderr is not a terminal nothing is drawn live and the caller
//! prints the final tree once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use console::{truncate_str, Term};
use specify_core::StepTracker;

/// Handle for a tracker being redrawn live
pub struct LiveTree {
    term: Term,
    drawn: Arc<AtomicUsize>,
}

impl LiveTree {
    /// Attach a redraw callback to `tracker` when stderr is a terminal
    pub fn attach(tracker: &mut StepTracker) -> Self {
        let term = Term::stderr();
        let drawn = Arc::new(AtomicUsize::new(0));

        if term.is_term() {
            let cb_term = term.clone();
            let cb_drawn = drawn.clone();
            tracker.attach_refresh(Box::new(move |t: &StepTracker| {
                let previous = cb_drawn.swap(0, Ordering::SeqCst);
                if previous > 0 {
                    cb_term.clear_last_lines(previous)?;
                }
                let width = cb_term.size().1 as usize;
                let rendered = t.render();
                let mut count = 0;
                for line in rendered.lines() {
                    // Wrapped lines would break the line count used for clearing
                    cb_term.write_line(&truncate_str(line, width.saturating_sub(1), "…"))?;
                    count += 1;
                }
                cb_drawn.store(count, Ordering::SeqCst);
                Ok(())
            }));
            tracker.refresh();
        }

        Self { term, drawn }
    }

    /// Stop redrawing and erase the live tree
    pub fn finish(self, tracker: &mut StepTracker) {
        tracker.detach_refresh();
        let previous = self.drawn.swap(0, Ordering::SeqCst);
        if previous > 0 {
            let _ = self.term.clear_last_lines(previous);
        }
    }
}
