//! Signed-in user, role-based access and session persistence.
//!
//! The session is the `{username, role}` pair returned by the login endpoint.
//! It is kept in a small JSON file and restored on start, so the terminal
//! opens straight into the sections the role may use.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Back-office roles known to the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    TourManager,
    ClientManager,
    InsuranceManager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::TourManager, Role::ClientManager, Role::InsuranceManager];

    /// Sections this role may open, in sidebar order
    pub fn sections(self) -> &'static [Section] {
        match self {
            Role::TourManager => &[Section::Tours, Section::TourOffers],
            Role::ClientManager => &[Section::ClientInfo],
            Role::InsuranceManager => &[Section::Insurance],
        }
    }

    pub fn can_access(self, section: Section) -> bool {
        self.sections().contains(&section)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::TourManager => "TourManager",
            Role::ClientManager => "ClientManager",
            Role::InsuranceManager => "InsuranceManager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown role '{}'. Expected one of: {}",
                    s,
                    Role::ALL.map(Role::as_str).join(", ")
                )
            })
    }
}

/// Screens of the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Tours,
    TourOffers,
    ClientInfo,
    Insurance,
}

impl Section {
    /// Every section, in the order of the number keys
    pub const ALL: [Section; 4] = [Section::Tours, Section::TourOffers, Section::ClientInfo, Section::Insurance];

    pub fn title(self) -> &'static str {
        match self {
            Section::Tours => "Tours",
            Section::TourOffers => "Tour offers",
            Section::ClientInfo => "Clients",
            Section::Insurance => "Insurance",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Tours => "🧳",
            Section::TourOffers => "🏷",
            Section::ClientInfo => "👤",
            Section::Insurance => "🛡",
        }
    }
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub username: String,
    pub role: Role,
}

impl UserSession {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

/// Session file on disk
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the saved session
    ///
    /// A missing file yields `None`. A file that does not hold a username and
    /// a known role is removed and also yields `None`.
    pub fn load(&self) -> Result<Option<UserSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;

        match serde_json::from_str::<UserSession>(&content) {
            Ok(session) if !session.username.trim().is_empty() => Ok(Some(session)),
            Ok(_) => {
                log::warn!("Ignoring saved session without a username");
                self.clear()?;
                Ok(None)
            }
            Err(e) => {
                log::error!("Failed to read saved session from {}: {}", self.path.display(), e);
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Persist the session, creating parent directories as needed
    pub fn save(&self, session: &UserSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;
        log::info!("Saved session for {} ({})", session.username, session.role);
        Ok(())
    }

    /// Forget the session; a missing file is not an error
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove session file: {}", self.path.display())),
        }
    }
}
