//! Read-only identifier to name lookups used for mentions.
//!
//! Directories are built once from the export's `users.json` and
//! `channels.json` and then only borrowed by renderers, so one directory can
//! back any number of concurrent renders.

use std::collections::HashMap;

use serde::Deserialize;

/// User record from a Slack export `users.json`.
///
/// Only the fields mentions need are read; the rest of the record is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: String,
    /// Workspace handle, used as the mention display name.
    pub name: String,
}

/// Channel record from a Slack export `channels.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRecord {
    pub id: String,
    pub name: String,
}

/// Mapping from user ID to display name.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    names: HashMap<String, String>,
}

impl UserDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from export user records.
    ///
    /// Later records with the same ID replace earlier ones.
    pub fn from_users<'a>(users: impl IntoIterator<Item = &'a UserRecord>) -> Self {
        users
            .into_iter()
            .map(|user| (user.id.clone(), user.name.clone()))
            .collect()
    }

    /// Add or replace a user.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Display name for a user ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Number of known users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for UserDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Mapping from channel ID to channel name.
#[derive(Debug, Clone, Default)]
pub struct ChannelDirectory {
    names: HashMap<String, String>,
}

impl ChannelDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from export channel records.
    pub fn from_channels<'a>(channels: impl IntoIterator<Item = &'a ChannelRecord>) -> Self {
        channels
            .into_iter()
            .map(|channel| (channel.id.clone(), channel.name.clone()))
            .collect()
    }

    /// Add or replace a channel.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Name for a channel ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Number of known channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for ChannelDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
