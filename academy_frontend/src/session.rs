use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

/// The signed-in identity: the bearer token plus the user id the signin
/// endpoint handed back. The id is what post authorship is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Durable, app-scoped storage for the session. A plain JSON file under the
/// user's home directory; tokens are stored in the clear, which is the
/// documented (weak) contract of this store.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open() -> Self {
        let dir = if let Some(home) = dirs::home_dir() {
            home.join(".academy")
        } else {
            PathBuf::from(".academy")
        };
        Self {
            path: dir.join("session.json"),
        }
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let body = serde_json::to_string(session).context("failed to encode session")?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Returns the stored session, or `None` when there is none or the file
    /// is unreadable. A corrupt file means signed out, not a crash.
    pub fn get(&self) -> Option<Session> {
        let body = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&body) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!("discarding unreadable session file: {err}");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}
