use serde::{Deserialize, Serialize};

use crate::core_users::error::UserError;

/// Marker in the password field meaning the real hash lives in the shadow file.
pub const SHADOW_PLACEHOLDER: &str = "x";

/// One record of the account registry file.
///
/// Field order on disk is `username:password:uid:gid:comment:homedir:shell`.
/// The comment field is the GECOS sub-field: only the part before the first
/// comma (the display name) is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswdEntry {
    pub username: String,
    /// Literal encoded hash, or [`SHADOW_PLACEHOLDER`].
    pub password: String,
    pub uid: u32,
    pub gid: u32,
    /// Display name (GECOS up to the first comma).
    pub comment: String,
    pub homedir: String,
    pub shell: String,
}

/// How a parse call reacts to a line with the wrong field count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Bulk scan: the line is skipped, not reported.
    Tolerant,
    /// Targeted lookup: the line is a hard error.
    Strict,
}

impl PasswdEntry {
    /// Parses one registry line.
    ///
    /// Comment (`#`) and blank lines yield `Ok(None)` under both policies.
    /// A wrong field count yields `Ok(None)` under [`ParsePolicy::Tolerant`]
    /// and [`UserError::MalformedEntry`] under [`ParsePolicy::Strict`].
    /// A non-numeric uid or gid is a hard error under both policies.
    pub fn parse_line(line: &str, policy: ParsePolicy) -> Result<Option<Self>, UserError> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() != 7 {
            return match policy {
                ParsePolicy::Tolerant => Ok(None),
                ParsePolicy::Strict => Err(UserError::MalformedEntry(format!(
                    "want 7 fields, got {}",
                    fields.len()
                ))),
            };
        }

        let uid = fields[2].parse::<u32>().map_err(|e| {
            UserError::MalformedEntry(format!("error parsing uid for {}: {}", fields[0], e))
        })?;
        let gid = fields[3].parse::<u32>().map_err(|e| {
            UserError::MalformedEntry(format!("error parsing gid for {}: {}", fields[0], e))
        })?;

        // The GECOS field is by convention a comma separated list whose first
        // item is the display name.
        let comment = match fields[4].find(',') {
            Some(i) => &fields[4][..i],
            None => fields[4],
        };

        Ok(Some(PasswdEntry {
            username: fields[0].to_string(),
            password: fields[1].to_string(),
            uid,
            gid,
            comment: comment.to_string(),
            homedir: fields[5].to_string(),
            shell: fields[6].to_string(),
        }))
    }

    /// Strict single-record parse, for the targeted lookup path.
    pub fn from_line(line: &str) -> Result<Self, UserError> {
        match Self::parse_line(line, ParsePolicy::Strict)? {
            Some(entry) => Ok(entry),
            None => Err(UserError::MalformedEntry(
                "comment or blank line".to_string(),
            )),
        }
    }

    /// Whether the registry defers to the shadow file for this account.
    pub fn has_shadow_password(&self) -> bool {
        self.password == SHADOW_PLACEHOLDER
    }
}
