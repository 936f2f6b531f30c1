//! Session store persisted to a small JSON file.
//!
//! The file holds a single entry, `{"sessionId": "<token>"}`, so a session
//! survives process restarts the same way browser storage survives reloads.
//!
//! ERROR HANDLING
//! ==============
//! Storage failures are logged and swallowed. The in-process value stays
//! authoritative, so a read-only disk never leaves the client believing it
//! holds a session it just cleared. When the file cannot be removed, it is
//! overwritten with an empty token so the next run also starts signed out.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{SESSION_KEY, SessionStore, non_empty};

/// Durable session store backed by one JSON file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    token: RefCell<Option<String>>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading any previously saved token.
    ///
    /// A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = load(&path);
        Self { path, token: RefCell::new(token) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) {
        let Some(token) = non_empty(Some(token.to_owned())) else {
            self.clear();
            return;
        };
        save(&self.path, &token);
        *self.token.borrow_mut() = Some(token);
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "session file removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file remove failed; blanking it");
                if let Err(e) = write_token(&self.path, "") {
                    tracing::error!(path = %self.path.display(), error = %e, "stale session left on disk");
                }
            }
        }
    }
}

fn load(path: &Path) -> Option<String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "session file read failed");
            return None;
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(stored) => non_empty(stored.get(SESSION_KEY).and_then(Value::as_str).map(ToOwned::to_owned)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "session file is not valid JSON; ignoring");
            None
        }
    }
}

fn save(path: &Path, token: &str) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(path = %parent.display(), error = %e, "session dir create failed");
            return;
        }
    }
    if let Err(e) = write_token(path, token) {
        tracing::warn!(path = %path.display(), error = %e, "session file write failed");
    }
}

/// Write `{"sessionId": token}`; an empty token loads back as no session.
fn write_token(path: &Path, token: &str) -> std::io::Result<()> {
    let mut stored = Map::new();
    stored.insert(SESSION_KEY.to_owned(), Value::String(token.to_owned()));
    std::fs::write(path, Value::Object(stored).to_string())
}
