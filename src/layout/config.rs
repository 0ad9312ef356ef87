use crate::pool::DEFAULT_SLOTS;

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct SquarifyConfig {
    /// Slots in the scratch buffer pool used by one build
    pub scratch_slots: usize,
}

impl Default for SquarifyConfig {
    fn default() -> Self {
        Self {
            scratch_slots: DEFAULT_SLOTS,
        }
    }
}
