#![forbid(unsafe_code)]

//! Column-count change notifications.
//!
//! Observers are plain closures invoked synchronously, in registration
//! order, from inside the sizing phase. They never see the panel itself, so
//! a notification cannot start another pass on the same panel.

/// Identifier returned by [`ColumnObservers::subscribe`].
pub type ObserverId = u64;

/// The column count derived by a sizing phase differs from the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnCountChanged {
    /// Column count before this pass.
    pub previous: usize,
    /// Newly derived column count.
    pub columns: usize,
}

type Callback = Box<dyn FnMut(&ColumnCountChanged)>;

/// Registry of column-count observers.
#[derive(Default)]
pub struct ColumnObservers {
    next_id: ObserverId,
    entries: Vec<(ObserverId, Callback)>,
}

impl std::fmt::Debug for ColumnObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnObservers")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}

impl ColumnObservers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Returns an id for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&ColumnCountChanged) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver an event to every callback.
    pub fn notify(&mut self, event: &ColumnCountChanged) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }
}
