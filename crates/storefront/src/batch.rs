//! Outcome of sequential per-image requests.

/// Kind of batch, which decides the wording of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Upload,
    Delete,
}

/// Result of running one request per item, continuing past failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub kind: BatchKind,
    pub total: usize,
    pub succeeded: usize,
    /// One user-facing message per failed item, in request order.
    pub errors: Vec<String>,
    /// Positions of the failed items in the submitted batch.
    pub failed_items: Vec<usize>,
}

impl BatchReport {
    #[must_use]
    pub const fn new(kind: BatchKind) -> Self {
        Self {
            kind,
            total: 0,
            succeeded: 0,
            errors: Vec::new(),
            failed_items: Vec::new(),
        }
    }

    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.failed_items.push(self.total);
        self.total += 1;
        self.errors.push(message.into());
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    /// Split the submitted `items` into those that succeeded and those that
    /// failed, keeping their order.
    #[must_use]
    pub fn partition<T>(&self, items: Vec<T>) -> (Vec<T>, Vec<T>) {
        let (failed, succeeded): (Vec<_>, Vec<_>) = items
            .into_iter()
            .enumerate()
            .partition(|(index, _)| self.failed_items.contains(index));
        (
            succeeded.into_iter().map(|(_, item)| item).collect(),
            failed.into_iter().map(|(_, item)| item).collect(),
        )
    }

    /// Summary line for the notifier.
    #[must_use]
    pub fn summary(&self) -> String {
        let errors = self.errors.join(", ");
        match (self.kind, self.all_succeeded(), self.succeeded) {
            (BatchKind::Upload, true, _) => {
                format!("All {} image(s) uploaded successfully!", self.total)
            }
            (BatchKind::Upload, false, 0) => format!(
                "Failed to upload images: {}",
                self.errors.first().map_or("", String::as_str)
            ),
            (BatchKind::Upload, false, ok) => format!(
                "{ok}/{} images uploaded. {} failed: {errors}",
                self.total,
                self.failed()
            ),
            (BatchKind::Delete, true, _) => {
                format!("All {} image(s) deleted successfully!", self.total)
            }
            (BatchKind::Delete, false, _) => format!(
                "{} of {} image(s) failed to delete: {errors}",
                self.failed(),
                self.total
            ),
        }
    }
}
