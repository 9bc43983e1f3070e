//! Batch download state tracking.

/// Progress counters for one batch (a page of thumbnails, a gallery).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchState {
    /// Items eligible for download.
    pub total: u64,
    pub downloaded: u64,
    pub failed: u64,
}

impl BatchState {
    /// Create state for a batch of `total` items.
    pub fn new(total: u64) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Record a successful item.
    pub fn record_success(&mut self) {
        self.downloaded += 1;
    }

    /// Record a failed item.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Items processed so far.
    pub fn attempted(&self) -> u64 {
        self.downloaded + self.failed
    }

    /// Whether any items are still to come.
    pub fn has_remaining(&self) -> bool {
        self.attempted() < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut state = BatchState::new(3);
        state.record_success();
        state.record_failure();
        assert_eq!(state.attempted(), 2);
        assert!(state.has_remaining());

        state.record_success();
        assert!(!state.has_remaining());
        assert_eq!(state.downloaded, 2);
        assert_eq!(state.failed, 1);
    }
}
