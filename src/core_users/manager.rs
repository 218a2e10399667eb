use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::config::UserDbConfig;
use crate::core_crypt::{SchemeRegistry, VerifyOutcome};
use crate::core_users::cache::UserCache;
use crate::core_users::entry::PasswdEntry;
use crate::core_users::error::UserError;
use crate::core_users::shadow;

/// The public entry points for account resolution and authentication.
///
/// Lookups by name and by uid go through the mtime-invalidated
/// [`UserCache`]; [`get_entry`](Self::get_entry) is the targeted path that
/// reads the registry fresh, parses strictly, and pulls the real hash from
/// the shadow file when the registry stores only the placeholder.
pub struct UserManager {
    config: UserDbConfig,
    cache: UserCache,
    schemes: SchemeRegistry,
}

impl UserManager {
    pub fn new(config: UserDbConfig) -> Self {
        let cache = UserCache::new(config.passwd_file.clone());
        Self {
            config,
            cache,
            schemes: SchemeRegistry::default(),
        }
    }

    /// Resolves the account of the calling process's real uid.
    pub fn current_user(&self) -> Result<PasswdEntry, UserError> {
        self.cache.lookup_by_uid(current_uid())
    }

    pub fn lookup_by_name(&self, username: &str) -> Result<PasswdEntry, UserError> {
        self.cache.lookup_by_name(username)
    }

    pub fn lookup_by_uid(&self, uid: u32) -> Result<PasswdEntry, UserError> {
        self.cache.lookup_by_uid(uid)
    }

    /// Looks up a textual uid, e.g. from a command argument or a wire
    /// protocol. This is the only place a textual id is accepted; it is
    /// parsed here and rejected with [`UserError::InvalidUserId`] if it is
    /// not a number.
    pub fn lookup_by_id(&self, id: &str) -> Result<PasswdEntry, UserError> {
        let uid = id
            .parse::<u32>()
            .map_err(|e| UserError::InvalidUserId(format!("{}: {}", id, e)))?;
        self.cache.lookup_by_uid(uid)
    }

    /// Fetches the registry entry for `username` with its credential hash
    /// resolved.
    ///
    /// Reads the registry fresh (no cache) and parses the matched line
    /// strictly. A placeholder password field is replaced by the matching
    /// shadow hash; a placeholder with no shadow line yields an entry with
    /// an empty password and no error. An unknown username is `Ok(None)`.
    pub fn get_entry(&self, username: &str) -> Result<Option<PasswdEntry>, UserError> {
        let line = match self.find_registry_line(username)? {
            Some(line) => line,
            None => return Ok(None),
        };
        let mut entry = PasswdEntry::from_line(&line)?;
        if entry.has_shadow_password() {
            entry.password = shadow::lookup_hash(&self.config.shadow_file, username)?
                .unwrap_or_default();
        }
        Ok(Some(entry))
    }

    /// Checks `password` against the entry's credential hash. Fails closed:
    /// an unrecognized or malformed hash is reported the same as a wrong
    /// password. Use [`check_password`](Self::check_password) to tell the
    /// two apart.
    pub fn authenticate(&self, entry: &PasswdEntry, password: &str) -> bool {
        self.schemes.verify(&entry.password, password)
    }

    /// Tri-state variant of [`authenticate`](Self::authenticate).
    pub fn check_password(&self, entry: &PasswdEntry, password: &str) -> VerifyOutcome {
        self.schemes.check(&entry.password, password)
    }

    /// The scheme registry, for registering additional hash schemes.
    pub fn schemes_mut(&mut self) -> &mut SchemeRegistry {
        &mut self.schemes
    }

    fn find_registry_line(&self, username: &str) -> Result<Option<String>, UserError> {
        let path = &self.config.passwd_file;
        let file = File::open(path)
            .map_err(|e| UserError::DatabaseRead(format!("{}: {}", path.display(), e)))?;
        for line in BufReader::new(file).lines() {
            let line =
                line.map_err(|e| UserError::DatabaseRead(format!("{}: {}", path.display(), e)))?;
            if line.split(':').next() == Some(username) {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

/// Real uid of the calling process. The one OS call in the crate.
fn current_uid() -> u32 {
    // SAFETY: getuid cannot fail and takes no pointers.
    unsafe { libc::getuid() }
}
