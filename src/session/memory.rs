//! In-process session store.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;

use super::{SessionStore, non_empty};

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RefCell<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `token` already stored.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: RefCell::new(non_empty(Some(token.to_owned()))) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = non_empty(Some(token.to_owned()));
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}
