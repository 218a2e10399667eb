use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Mutex;

use filetime::FileTime;
use log::{debug, warn};

use crate::core_users::entry::{ParsePolicy, PasswdEntry};
use crate::core_users::error::UserError;

/// In-memory index over the registry file, keyed by username and by uid.
///
/// The indices are rebuilt whenever the file's modification time differs
/// from the last one observed, so external edits (account creation,
/// deletion, uid changes) are picked up without the caller invalidating
/// anything. An edit that lands within the filesystem's timestamp
/// resolution of the previous build is not detected; that staleness window
/// is accepted.
///
/// Both indices live behind one `Mutex`, so a lookup never observes one
/// index reflecting an older file generation than the other, and a second
/// rebuild request waits for the one in progress.
#[derive(Debug)]
pub struct UserCache {
    passwd_file: PathBuf,
    state: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    mtime: Option<FileTime>,
    by_name: HashMap<String, PasswdEntry>,
    by_uid: HashMap<u32, PasswdEntry>,
}

impl UserCache {
    pub fn new(passwd_file: PathBuf) -> Self {
        Self {
            passwd_file,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn lookup_by_name(&self, username: &str) -> Result<PasswdEntry, UserError> {
        let mut state = self.state.lock().unwrap();
        self.refresh(&mut state)?;
        state
            .by_name
            .get(username)
            .cloned()
            .ok_or_else(|| UserError::UserNotFound(username.to_string()))
    }

    pub fn lookup_by_uid(&self, uid: u32) -> Result<PasswdEntry, UserError> {
        let mut state = self.state.lock().unwrap();
        self.refresh(&mut state)?;
        state
            .by_uid
            .get(&uid)
            .cloned()
            .ok_or(UserError::UidNotFound(uid))
    }

    /// Rebuilds the indices if the file changed since the last build, or if
    /// they were never built. A failed rebuild leaves the previous
    /// generation in place.
    fn refresh(&self, state: &mut CacheState) -> Result<(), UserError> {
        let metadata = std::fs::metadata(&self.passwd_file)
            .map_err(|e| UserError::DatabaseRead(format!("{}: {}", self.passwd_file.display(), e)))?;
        let mtime = FileTime::from_last_modification_time(&metadata);
        if state.mtime == Some(mtime) {
            return Ok(());
        }

        let (by_name, by_uid) = self.build_indices()?;
        debug!(
            "user cache rebuilt from {} ({} entries)",
            self.passwd_file.display(),
            by_name.len()
        );
        state.by_name = by_name;
        state.by_uid = by_uid;
        state.mtime = Some(mtime);
        Ok(())
    }

    /// Scans the whole registry file into fresh indices. Lines with the
    /// wrong field count are skipped; a non-numeric uid or gid aborts the
    /// scan and invalidates the whole attempt.
    fn build_indices(
        &self,
    ) -> Result<(HashMap<String, PasswdEntry>, HashMap<u32, PasswdEntry>), UserError> {
        let file = File::open(&self.passwd_file)
            .map_err(|e| UserError::DatabaseRead(format!("{}: {}", self.passwd_file.display(), e)))?;

        let mut by_name = HashMap::new();
        let mut by_uid = HashMap::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                UserError::DatabaseRead(format!("{}: {}", self.passwd_file.display(), e))
            })?;
            match PasswdEntry::parse_line(&line, ParsePolicy::Tolerant)? {
                Some(entry) => {
                    by_uid.insert(entry.uid, entry.clone());
                    by_name.insert(entry.username.clone(), entry);
                }
                None => {
                    if !line.is_empty() && !line.starts_with('#') {
                        warn!(
                            "skipping malformed entry at {}:{}",
                            self.passwd_file.display(),
                            lineno + 1
                        );
                    }
                }
            }
        }
        Ok((by_name, by_uid))
    }
}
