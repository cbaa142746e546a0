//! Progress tracking for batch downloads

/// Progress information for a batch download
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Total number of entries in the batch
    pub total: usize,
    /// Number of entries processed so far
    pub completed: usize,
    /// Progress as a percentage (0.0 to 100.0)
    pub percent: f64,
    /// Whether the batch is still running
    pub in_progress: bool,
}

impl BatchProgress {
    /// Create a new progress tracker
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            percent: 0.0,
            in_progress: true,
        }
    }

    /// Update progress with the number of processed entries.
    ///
    /// The completed count never moves backwards while the batch runs.
    pub fn update(&mut self, completed: usize) {
        if completed < self.completed {
            return;
        }
        self.completed = completed;
        self.percent = if self.total > 0 {
            (completed as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };
    }

    /// Reset progress to zero and clear the in-progress flag.
    ///
    /// Called on both normal completion and abort.
    pub fn finish(&mut self) {
        self.completed = 0;
        self.percent = 0.0;
        self.in_progress = false;
    }

    /// Check if every entry has been processed
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}
