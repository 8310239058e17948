use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ligdom::engine::progress::{Progress, ProgressCallback};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const BAR_TEMPLATE: &str = "{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})";

/// Renders engine progress events as a terminal spinner or bar on stderr.
///
/// [`ProgressBar`] is internally reference counted and synchronized, so the
/// handler hands out callbacks that may fire from any rayon worker.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |progress| apply(&bar, progress))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(bar: &ProgressBar, progress: Progress) {
    match progress {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_message(name);
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.set_length(total_steps);
            bar.set_position(0);
            bar.set_style(bar_style());
        }
        Progress::TaskIncrement => bar.inc(1),
        Progress::TaskFinish => {
            if let Some(length) = bar.length() {
                bar.set_position(length);
            }
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message("✓ Done");
        }
        Progress::Message(message) => bar.println(format!("  {message}")),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn templates_are_valid() {
        assert!(ProgressStyle::with_template(SPINNER_TEMPLATE).is_ok());
        assert!(ProgressStyle::with_template(BAR_TEMPLATE).is_ok());
    }

    #[test]
    fn handler_starts_finished_and_empty() {
        let handler = hidden_handler();
        assert!(handler.bar.is_finished());
        assert_eq!(handler.bar.length(), Some(0));
    }

    #[test]
    fn scan_events_drive_the_bar_to_completion() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Parsing Structures",
        });
        assert_eq!(handler.bar.message(), "Parsing Structures");
        assert!(!handler.bar.is_finished());

        callback(Progress::TaskStart { total_steps: 3 });
        callback(Progress::TaskIncrement);
        assert_eq!(handler.bar.length(), Some(3));
        assert_eq!(handler.bar.position(), 1);

        callback(Progress::TaskFinish);
        assert_eq!(handler.bar.position(), 3);

        callback(Progress::PhaseFinish);
        assert!(handler.bar.is_finished());
        assert_eq!(handler.bar.message(), "✓ Done");
    }

    #[test]
    fn increments_from_many_threads_are_all_counted() {
        let handler = hidden_handler();
        let callback = handler.get_callback();
        callback(Progress::TaskStart { total_steps: 64 });

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..8 {
                        callback(Progress::TaskIncrement);
                    }
                });
            }
        });

        assert_eq!(handler.bar.position(), 64);
    }
}
