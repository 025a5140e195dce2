use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Page-level listener registry supplied by the host UI.
///
/// While a suppressor is installed the host cancels the toolkit's native
/// ctrl+wheel zoom everywhere on the page.
pub trait NativeZoomHost {
    fn add_wheel_suppressor(&self) -> ListenerId;
    fn remove_wheel_suppressor(&self, id: ListenerId);
}

/// Scoped native-zoom suppression.
///
/// Installed on mount; the listener is removed exactly once when the guard drops.
pub struct NativeZoomGuard {
    host: Rc<dyn NativeZoomHost>,
    id: ListenerId,
}

impl NativeZoomGuard {
    #[must_use]
    pub fn acquire(host: Rc<dyn NativeZoomHost>) -> Self {
        let id = host.add_wheel_suppressor();
        debug!(listener = id.0, "native zoom suppression installed");
        Self { host, id }
    }

    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for NativeZoomGuard {
    fn drop(&mut self) {
        self.host.remove_wheel_suppressor(self.id);
        debug!(listener = self.id.0, "native zoom suppression removed");
    }
}

impl fmt::Debug for NativeZoomGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeZoomGuard")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// In-memory host used by tests and headless embeddings.
#[derive(Debug, Default)]
pub struct HeadlessNativeZoomHost {
    next_id: Cell<u64>,
    active: RefCell<BTreeSet<ListenerId>>,
    removed: Cell<usize>,
}

impl HeadlessNativeZoomHost {
    #[must_use]
    pub fn is_suppressing(&self) -> bool {
        !self.active.borrow().is_empty()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.get()
    }
}

impl NativeZoomHost for HeadlessNativeZoomHost {
    fn add_wheel_suppressor(&self) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.active.borrow_mut().insert(id);
        id
    }

    fn remove_wheel_suppressor(&self, id: ListenerId) {
        if self.active.borrow_mut().remove(&id) {
            self.removed.set(self.removed.get() + 1);
        }
    }
}
