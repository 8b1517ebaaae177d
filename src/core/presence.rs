//! Shared presence registry: viewer -> last-seen, sliding-window eviction.
//!
//! The registry is a JSON object on disk guarded by an exclusive lock on a
//! sibling `<file>.lock`. Every `touch` holds that lock for its whole
//! read-clean-write cycle, so concurrent processes cannot lose each other's
//! updates.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, TimeDelta};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
pub const DEFAULT_WINDOW_SECS: u64 = 120;

/// Viewer id -> last-seen timestamp string.
pub type PresenceMap = BTreeMap<String, String>;

pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

#[derive(Debug, Clone)]
pub struct PresenceRegistry {
    path: PathBuf,
    lock_path: PathBuf,
    window: TimeDelta,
}

impl PresenceRegistry {
    pub fn new<P: Into<PathBuf>>(path: P, window_secs: u64) -> Self {
        let path = path.into();
        let mut lock_name = path.clone().into_os_string();
        lock_name.push(".lock");
        Self {
            path,
            lock_path: PathBuf::from(lock_name),
            window: TimeDelta::seconds(window_secs as i64),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.presence_file, cfg.presence_window_secs)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Record `viewer` as seen at `now`, purge everyone outside the window,
    /// persist, and return what is left.
    pub fn touch(&self, viewer: &str, now: NaiveDateTime) -> AppResult<PresenceMap> {
        let _lock = RegistryLock::acquire(&self.lock_path)?;

        let mut entries = self.read_entries();
        entries.insert(viewer.to_string(), format_timestamp(now));

        let cleaned = evict_stale(entries, now, self.window);
        self.write_entries(&cleaned)?;

        debug!(viewer, active = cleaned.len(), "presence touched");
        Ok(cleaned)
    }

    /// Current persisted mapping, read under the lock, left untouched.
    pub fn snapshot(&self) -> AppResult<PresenceMap> {
        let _lock = RegistryLock::acquire(&self.lock_path)?;
        Ok(self.read_entries())
    }

    /// Missing or corrupt files read as empty; non-string values are skipped.
    fn read_entries(&self) -> PresenceMap {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return PresenceMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "presence file unreadable, starting empty");
                return PresenceMap::new();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(serde_json::Value::Object(map)) => map
                .into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect(),
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "presence file corrupt, starting empty");
                PresenceMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &PresenceMap) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;

        let mut tmp_name = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keep entries seen less than `window` before `now`; unparsable ones go.
pub fn evict_stale(entries: PresenceMap, now: NaiveDateTime, window: TimeDelta) -> PresenceMap {
    entries
        .into_iter()
        .filter(|(_, ts)| parse_timestamp(ts).is_some_and(|t| now - t < window))
        .collect()
}

/// Exclusive advisory lock, released when dropped.
struct RegistryLock {
    file: File,
}

impl RegistryLock {
    fn acquire(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;

        FileExt::lock_exclusive(&file)
            .map_err(|e| AppError::Lock(format!("{}: {e}", path.display())))?;

        Ok(Self { file })
    }
}

impl Drop for RegistryLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(error = %e, "failed to release presence lock");
        }
    }
}
