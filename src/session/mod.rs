//! Client-held session identifier.
//!
//! SYSTEM CONTEXT
//! ==============
//! The stored session id is the only authentication signal on the client.
//! The gateway reads it to stamp outbound requests, the router reads it on
//! every navigation, and login/logout plus the 401 handler write it.
//!
//! DESIGN
//! ======
//! Stores are shared as `Rc<dyn SessionStore>`: everything runs on one
//! cooperative thread, so interior mutability through `RefCell` is enough.
//! There is no expiry; a token stays valid until the server rejects it or
//! the user logs out.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Storage key (and JSON field name) for the persisted session id.
pub const SESSION_KEY: &str = "sessionId";

/// Get/set/clear access to the persisted session identifier.
pub trait SessionStore {
    /// Current token, or `None` when no session is stored.
    fn get(&self) -> Option<String>;

    /// Store `token`, replacing any previous value. An empty token clears.
    fn set(&self, token: &str);

    /// Remove the stored token. Clearing an empty store is a no-op.
    fn clear(&self);

    fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

/// Normalize a raw stored value: empty strings count as "no session".
pub(crate) fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|token| !token.is_empty())
}
