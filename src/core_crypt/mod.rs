// Password hash verification, dispatched on the hash string's own
// $scheme$ prefix.

pub mod apr1;

#[cfg(test)]
mod test_crypt;

use log::debug;

/// Outcome of checking a candidate password against an encoded hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The password reproduces the hash.
    Match,
    /// The scheme is recognized and the password does not match.
    Mismatch,
    /// No registered scheme recognizes the hash encoding.
    Unsupported,
}

/// One password hashing scheme, identified by its encoded-hash prefix.
pub trait HashScheme: Send + Sync {
    /// Scheme label used in logs.
    fn name(&self) -> &'static str;

    /// Whether this scheme recognizes the encoded hash.
    fn matches(&self, hash: &str) -> bool;

    /// Whether `password` reproduces `hash`. A malformed encoding is a
    /// mismatch, never a panic.
    fn verify(&self, hash: &str, password: &str) -> bool;
}

/// Open registry of hashing schemes. Dispatch picks the first scheme whose
/// `matches` accepts the hash; new schemes register without touching the
/// dispatch logic.
pub struct SchemeRegistry {
    schemes: Vec<Box<dyn HashScheme>>,
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            schemes: Vec::new(),
        };
        registry.register(Box::new(Md5Crypt));
        registry.register(Box::new(Apr1Md5));
        registry.register(Box::new(Sha256Crypt));
        registry.register(Box::new(Sha512Crypt));
        registry.register(Box::new(Bcrypt));
        registry
    }
}

impl SchemeRegistry {
    pub fn register(&mut self, scheme: Box<dyn HashScheme>) {
        self.schemes.push(scheme);
    }

    /// Checks `password` against `hash` with the scheme selected by the
    /// hash's own prefix.
    pub fn check(&self, hash: &str, password: &str) -> VerifyOutcome {
        match self.schemes.iter().find(|s| s.matches(hash)) {
            Some(scheme) => {
                debug!("verifying credential with scheme {}", scheme.name());
                if scheme.verify(hash, password) {
                    VerifyOutcome::Match
                } else {
                    VerifyOutcome::Mismatch
                }
            }
            None => VerifyOutcome::Unsupported,
        }
    }

    /// Boolean form of [`check`](Self::check): an unrecognized or malformed
    /// hash fails closed.
    pub fn verify(&self, hash: &str, password: &str) -> bool {
        self.check(hash, password) == VerifyOutcome::Match
    }
}

struct Md5Crypt;

impl HashScheme for Md5Crypt {
    fn name(&self) -> &'static str {
        "md5-crypt"
    }

    fn matches(&self, hash: &str) -> bool {
        hash.starts_with("$1$")
    }

    fn verify(&self, hash: &str, password: &str) -> bool {
        pwhash::md5_crypt::verify(password, hash)
    }
}

struct Apr1Md5;

impl HashScheme for Apr1Md5 {
    fn name(&self) -> &'static str {
        "apr1-md5"
    }

    fn matches(&self, hash: &str) -> bool {
        hash.starts_with("$apr1$")
    }

    fn verify(&self, hash: &str, password: &str) -> bool {
        apr1::verify(hash, password)
    }
}

struct Sha256Crypt;

impl HashScheme for Sha256Crypt {
    fn name(&self) -> &'static str {
        "sha256-crypt"
    }

    fn matches(&self, hash: &str) -> bool {
        hash.starts_with("$5$")
    }

    fn verify(&self, hash: &str, password: &str) -> bool {
        pwhash::sha256_crypt::verify(password, hash)
    }
}

struct Sha512Crypt;

impl HashScheme for Sha512Crypt {
    fn name(&self) -> &'static str {
        "sha512-crypt"
    }

    fn matches(&self, hash: &str) -> bool {
        hash.starts_with("$6$")
    }

    fn verify(&self, hash: &str, password: &str) -> bool {
        pwhash::sha512_crypt::verify(password, hash)
    }
}

struct Bcrypt;

impl HashScheme for Bcrypt {
    fn name(&self) -> &'static str {
        "bcrypt"
    }

    fn matches(&self, hash: &str) -> bool {
        hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$")
    }

    fn verify(&self, hash: &str, password: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}
