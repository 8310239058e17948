/// Progress events emitted while a batch of structure files is processed.
///
/// A run is split into phases; a phase may contain one counted task whose
/// steps are reported as they finish, possibly from several threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// `total_steps` is the number of `TaskIncrement`s that will follow.
    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// Free-form note about a single item, e.g. a structure that was skipped.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// Shared by reference across rayon workers, hence the `Send + Sync` bound
/// on the callback.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(callback) = self.callback.as_ref() {
            callback(event);
        }
    }
}
