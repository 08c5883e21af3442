//! Routing table shared by the capability and plugin runtime registries.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use agentverse_protocols::ExtensionError;

/// An entry that routes by a string tag such as a step type or plugin type.
pub trait Registerable: Send + Sync {
    fn routing_key(&self) -> &str;
}

/// Concurrent map from routing key to a shared handler.
pub struct BaseRegistry<T: ?Sized + Registerable> {
    items: DashMap<String, Arc<T>>,
}

impl<T: ?Sized + Registerable> BaseRegistry<T> {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Add a handler under its routing key. The first registration of a key wins.
    pub fn register(&self, item: Arc<T>) -> Result<(), ExtensionError> {
        match self.items.entry(item.routing_key().to_string()) {
            Entry::Occupied(taken) => Err(ExtensionError::AlreadyRegistered(taken.key().clone())),
            Entry::Vacant(slot) => {
                slot.insert(item);
                Ok(())
            }
        }
    }

    pub fn unregister(&self, key: &str) -> Result<(), ExtensionError> {
        match self.items.remove(key) {
            Some(_) => Ok(()),
            None => Err(ExtensionError::NotFound(key.to_string())),
        }
    }

    /// Handler for `key`. The returned `Arc` holds no map lock.
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.items.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Registered keys in lexical order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Handlers ordered by routing key.
    pub fn sorted(&self) -> Vec<Arc<T>> {
        let mut handlers: Vec<Arc<T>> = self
            .items
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        handlers.sort_by(|a, b| a.routing_key().cmp(b.routing_key()));
        handlers
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: ?Sized + Registerable> Default for BaseRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "base_tests.rs"]
mod tests;
