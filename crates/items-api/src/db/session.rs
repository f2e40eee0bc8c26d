//! [`Session`]: a per-request handle on the item store.

use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::items::ItemStore;

/// Scoped access to the item store, released on drop.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    items: Arc<ItemStore>,
}

impl Session {
    pub(super) fn open(items: Arc<ItemStore>) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "session acquired");
        Self { id, items }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Deref for Session {
    type Target = ItemStore;

    fn deref(&self) -> &ItemStore {
        &self.items
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(session = %self.id, "session released");
    }
}
