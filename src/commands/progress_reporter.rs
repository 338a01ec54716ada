use crate::progress::Progress;
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Refresh rate for the spinner (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const DETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {pos}/{len}";
const DETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {pos}/{len}";
const INDETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{spinner}] {elapsed} {msg}";
const INDETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{spinner}] {elapsed} {msg}";

const TICK_STRINGS: &[&str] = &[
    "=>                       ",
    " ===>                    ",
    "      ===>               ",
    "           ===>          ",
    "                ===>     ",
    "                     ===>",
    "                     <===",
    "                <===     ",
    "           <===          ",
    "      <===               ",
    " <===                    ",
    "<=                       ",
];

/// Terminal progress bar on stderr.
///
/// Runs with logging enabled, or without a terminal, get a hidden reporter
/// that accepts every call and draws nothing.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    use_colors: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// When `use_colors` is false, progress bar chrome is rendered without ANSI styling.
    #[must_use]
    pub fn new(visible: bool, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        if visible {
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        Self { bar, use_colors }
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
        self.bar.set_message("");

        let template = if self.use_colors { INDETERMINATE_TEMPLATE } else { INDETERMINATE_TEMPLATE_NO_COLOR };
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template(template)
                .expect("could not create progress bar style")
                .tick_strings(TICK_STRINGS),
        );
        self.bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));
    }

    fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn set_length(&self, total: u64) {
        self.bar.disable_steady_tick();

        let template = if self.use_colors { DETERMINATE_TEMPLATE } else { DETERMINATE_TEMPLATE_NO_COLOR };
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("could not create progress bar style")
                .progress_chars("=> "),
        );
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn advance(&self) {
        self.bar.inc(1);
    }

    fn done(&self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_reporter_tracks_position() {
        let reporter = ProgressReporter::new(false, false);
        reporter.set_phase("Loading");
        reporter.set_length(3);
        reporter.advance();
        reporter.advance();

        assert_eq!(reporter.bar.position(), 2);
        assert_eq!(reporter.bar.length(), Some(3));
        assert_eq!(reporter.bar.prefix(), "Loading");

        reporter.done();
        assert!(reporter.bar.is_finished());
    }

    #[test]
    fn test_phase_change_keeps_reporting() {
        let reporter = ProgressReporter::new(false, true);
        reporter.set_phase("Loading");
        reporter.set_length(1);
        reporter.advance();
        reporter.set_phase("Rendering");
        reporter.set_length(5);

        assert_eq!(reporter.bar.position(), 0);
        assert_eq!(reporter.bar.prefix(), "Rendering");
    }

    #[test]
    fn test_message_names_current_work() {
        let reporter = ProgressReporter::new(false, false);
        reporter.set_phase("Loading");
        reporter.set_message("Achievement.csv");
        assert_eq!(reporter.bar.message(), "Achievement.csv");

        reporter.set_phase("Rendering");
        assert_eq!(reporter.bar.message(), "");
    }
}
