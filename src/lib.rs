//! Local account resolution and credential verification.
//!
//! Reads the colon-delimited account registry (`/etc/passwd`) and its shadow
//! credential file (`/etc/shadow`) directly, without going through the
//! host's native resolver. Lookups by name or uid are served from an
//! in-memory cache invalidated by the registry file's modification time;
//! password checks dispatch on the `$scheme$` prefix of the stored hash.
//!
//! ```no_run
//! use rouillepasswd::{UserDbConfig, UserManager};
//!
//! let manager = UserManager::new(UserDbConfig::default());
//! if let Some(entry) = manager.get_entry("alice")? {
//!     if manager.authenticate(&entry, "hunter2") {
//!         println!("welcome {}", entry.username);
//!     }
//! }
//! # Ok::<(), rouillepasswd::UserError>(())
//! ```

pub mod config;
pub mod core_crypt;
pub mod core_users;

pub use config::{Config, UserDbConfig};
pub use core_crypt::{HashScheme, SchemeRegistry, VerifyOutcome};
pub use core_users::{ParsePolicy, PasswdEntry, UserCache, UserError, UserManager};
