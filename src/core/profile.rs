//! Profile extraction from configuration filenames.
//!
//! A profile namespaces key lookup per environment: `.env.production` and
//! `app-production.properties` both resolve `DOTENV_PRIVATE_KEY_PRODUCTION`.

use crate::core::constants::{ENV_PROFILE_MARKER, PROPERTIES_EXTENSION, PRIVATE_KEY_VAR};
use crate::core::types::Profile;

/// Configuration file family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.env`-style files
    Env,
    /// Java-style `.properties` files
    Properties,
}

impl SourceKind {
    /// Detect the family from a filename.
    pub fn detect(filename: &str) -> Self {
        if filename.ends_with(PROPERTIES_EXTENSION) {
            Self::Properties
        } else {
            Self::Env
        }
    }
}

/// Extract the profile for a filename of the given family.
///
/// Empty profiles are reported as `None`.
pub fn extract(kind: SourceKind, filename: &str) -> Option<Profile> {
    let profile = match kind {
        SourceKind::Env => env_profile(filename)?,
        SourceKind::Properties => properties_profile(filename)?,
    };

    if profile.is_empty() {
        None
    } else {
        Some(profile.to_string())
    }
}

/// Everything after the first `.env.`.
fn env_profile(filename: &str) -> Option<&str> {
    let start = filename.find(ENV_PROFILE_MARKER)? + ENV_PROFILE_MARKER.len();
    Some(&filename[start..])
}

/// Between the first `-` and the last `.`, or to the end when no `.` follows.
fn properties_profile(filename: &str) -> Option<&str> {
    let start = filename.find('-')? + 1;
    let end = match filename.rfind('.') {
        Some(dot) if dot >= start => dot,
        _ => filename.len(),
    };
    Some(&filename[start..end])
}

/// Environment variable carrying the private key for a profile.
pub fn private_key_var(profile: Option<&str>) -> String {
    match profile {
        Some(p) if !p.is_empty() => format!("{}_{}", PRIVATE_KEY_VAR, p.to_uppercase()),
        _ => PRIVATE_KEY_VAR.to_string(),
    }
}
