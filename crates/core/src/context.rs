//! Per-query-execution evaluation context.
//!
//! Every node of one source tree sees the same [`EvalContext`] during one
//! execution. Nodes that need searcher-wide state compute it in
//! `create_weight` and read it back when bound to each segment.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type ContextValue = Arc<dyn Any + Send + Sync>;

/// Shared key/value map scoped to one query execution.
///
/// Interior locking lets segment workers share it by reference.
#[derive(Default)]
pub struct EvalContext {
    entries: RwLock<HashMap<String, ContextValue>>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) {
        self.entries.write().insert(key.into(), Arc::new(value));
    }

    /// Returns the entry under `key` if present and of type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let value = self.entries.read().get(key).cloned()?;
        value.downcast::<T>().ok()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();
        f.debug_struct("EvalContext").field("keys", &keys).finish()
    }
}
