use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core_users::error::UserError;

/// Looks up the credential hash for `username` in the shadow file.
///
/// The file is scanned fresh on every call; shadow data is never cached.
/// Matching is on exact equality of the first colon-delimited field, so a
/// username that is a prefix of another (`al` / `alice`) cannot be confused.
/// No matching line is not an error: the caller gets `Ok(None)`.
pub fn lookup_hash(shadow_file: &Path, username: &str) -> Result<Option<String>, UserError> {
    let file = File::open(shadow_file)
        .map_err(|e| UserError::DatabaseRead(format!("{}: {}", shadow_file.display(), e)))?;

    for line in BufReader::new(file).lines() {
        let line = line
            .map_err(|e| UserError::DatabaseRead(format!("{}: {}", shadow_file.display(), e)))?;
        let fields: Vec<&str> = line.split(':').collect();
        if fields[0] != username {
            continue;
        }
        if fields.len() < 2 {
            return Err(UserError::MalformedEntry(format!(
                "shadow entry for {}: want 2 or more fields, got {}",
                username,
                fields.len()
            )));
        }
        return Ok(Some(fields[1].to_string()));
    }

    Ok(None)
}
