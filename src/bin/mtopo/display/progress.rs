use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// The step currently running, with its spinner.
struct ActiveStep {
    label: &'static str,
    started: Instant,
    spinner: ProgressBar,
}

/// Numbered step reporting on stderr for one command run.
///
/// A silent instance accepts the same calls and prints nothing, so the
/// commands never branch on interactivity to report progress.
pub struct Progress {
    enabled: bool,
    total: u8,
    done: u8,
    started: Instant,
    active: Option<ActiveStep>,
}

impl Progress {
    pub fn new(interactive: bool, total: u8) -> Self {
        Self {
            enabled: interactive,
            total,
            done: 0,
            started: Instant::now(),
            active: None,
        }
    }

    /// Starts step `label`, replacing any spinner still running.
    pub fn step(&mut self, label: &'static str) {
        if !self.enabled {
            return;
        }
        self.clear_spinner();

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_chars(SPINNER_TICKS));
        }
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner.set_message(format!("[{}/{}] {label}...", self.done + 1, self.total));

        self.active = Some(ActiveStep {
            label,
            started: Instant::now(),
            spinner,
        });
    }

    /// Marks the running step done and lists `details` under it.
    pub fn complete(&mut self, details: &[String]) {
        let Some(step) = self.active.take() else {
            return;
        };
        step.spinner.finish_and_clear();
        self.done += 1;

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            step.label,
            step.started.elapsed().as_secs_f64()
        );
        for line in details {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {line}");
        }
    }

    pub fn finish(mut self) {
        if !self.enabled {
            return;
        }
        self.clear_spinner();

        let total = format!("{} steps in {:.2}s", self.done, self.started.elapsed().as_secs_f64());
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "  \x1b[2m{}\x1b[0m", "─".repeat(56));
        let _ = writeln!(stderr, "  \x1b[32m✓\x1b[0m Analysis complete {total:>36}");
        let _ = writeln!(stderr);
    }

    fn clear_spinner(&mut self) {
        if let Some(step) = self.active.take() {
            step.spinner.finish_and_clear();
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_progress_records_nothing() {
        let mut progress = Progress::new(false, 2);
        progress.step("Reading structure");
        progress.complete(&["ignored".to_string()]);
        assert!(progress.active.is_none());
        assert_eq!(progress.done, 0);
        progress.finish();
    }
}
