/// A trait for reporting progress of long-running operations.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Loading", "Rendering").
    fn set_phase(&self, phase: &str);

    /// Show what the current phase is working on, such as the table being loaded.
    fn set_message(&self, message: &str);

    /// Switch to determinate progress over `total` steps, starting from zero.
    fn set_length(&self, total: u64);

    /// Record one completed step.
    fn advance(&self);

    /// Finish and clear the progress indicator.
    fn done(&self);
}

/// Progress sink that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_phase(&self, _phase: &str) {}
    fn set_message(&self, _message: &str) {}
    fn set_length(&self, _total: u64) {}
    fn advance(&self) {}
    fn done(&self) {}
}
