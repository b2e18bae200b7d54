use std::sync::Arc;

use crate::stores::ActivityStore;
use crate::types::internal::activity::NewActivity;

/// Best-effort audit trail writer
///
/// Activity logging must never undo the mutation it describes, so failures are
/// downgraded to warnings instead of being propagated to the caller.
pub struct ActivityLogger {
    store: Arc<ActivityStore>,
}

impl ActivityLogger {
    pub fn new(store: Arc<ActivityStore>) -> Self {
        Self { store }
    }

    /// Record an activity, logging a warning when the write fails
    pub async fn log(&self, activity: NewActivity) {
        let description = activity.description.clone();
        if let Err(e) = self.store.record(activity).await {
            tracing::warn!("could not record activity '{}': {}", description, e);
        }
    }
}
