//! Private key resolution.
//!
//! Finds the private key for one load operation. Sources are tried in order
//! and the first non-empty hit wins:
//!
//! 1. explicit key supplied by the caller
//! 2. global key store, by the file's declared public key (properties only)
//! 3. `DOTENV_PRIVATE_KEY` / `DOTENV_PRIVATE_KEY_<PROFILE>` environment variable
//! 4. `.env.keys` in the configuration's directory
//! 5. `.env.keys` in the current directory
//! 6. `.env.keys` in the home directory
//!
//! Key file candidates that point at the same file are searched once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::KEYS_FILE;
use crate::core::domain::env;
use crate::core::keystore::{trim_private_key, GlobalKeyStore};
use crate::core::profile;
use crate::core::types::{Profile, PublicKeyHex};
use crate::error::KeyError;

/// Process environment seen by the resolver.
pub trait Environment {
    /// Value of an environment variable, if set.
    fn var(&self, name: &str) -> Option<String>;

    /// The user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The process working directory.
    fn current_dir(&self) -> Option<PathBuf>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn current_dir(&self) -> Option<PathBuf> {
        std::env::current_dir().ok()
    }
}

/// A fixed environment, for embedding and isolated tests.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    pub vars: HashMap<String, String>,
    pub home: Option<PathBuf>,
    pub current_dir: Option<PathBuf>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn current_dir(&self) -> Option<PathBuf> {
        self.current_dir.clone()
    }
}

/// Inputs for resolving one file's private key.
#[derive(Clone, Default)]
pub struct KeyContext {
    /// Key supplied directly by the caller
    pub private_key: Option<Zeroizing<String>>,
    /// Profile extracted from the filename
    pub profile: Option<Profile>,
    /// Public key declared inside the file (properties only)
    pub public_key: Option<PublicKeyHex>,
    /// Directory holding the configuration file
    pub directory: Option<PathBuf>,
}

impl std::fmt::Debug for KeyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyContext")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("profile", &self.profile)
            .field("public_key", &self.public_key)
            .field("directory", &self.directory)
            .finish()
    }
}

/// Where a resolved key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Explicit,
    GlobalStore,
    Environment(String),
    KeyFile(PathBuf),
}

/// Resolves and caches the private key for one load operation.
pub struct Resolver<E: Environment = SystemEnvironment> {
    context: KeyContext,
    env: E,
    store: Option<GlobalKeyStore>,
    cached: Option<(Zeroizing<String>, KeySource)>,
    searched: Vec<PathBuf>,
}

impl Resolver<SystemEnvironment> {
    /// Resolver over the real process environment.
    pub fn new(context: KeyContext) -> Self {
        Self::with_environment(context, SystemEnvironment)
    }
}

impl<E: Environment> Resolver<E> {
    /// Resolver over a custom environment.
    ///
    /// The global key store defaults to `<home>/.dotenvx/.env.keys.json`
    /// under the environment's home directory.
    pub fn with_environment(context: KeyContext, env: E) -> Self {
        let store = env.home_dir().map(|home| GlobalKeyStore::in_home(&home));
        Self {
            context,
            env,
            store,
            cached: None,
            searched: Vec::new(),
        }
    }

    /// Use an explicit global key store.
    pub fn with_store(mut self, store: GlobalKeyStore) -> Self {
        self.store = Some(store);
        self
    }

    /// The resolution inputs
    pub fn context(&self) -> &KeyContext {
        &self.context
    }

    /// Environment variable (and `.env.keys` entry) holding the key.
    pub fn var_name(&self) -> String {
        profile::private_key_var(self.context.profile.as_deref())
    }

    /// Source of the cached key, if resolved.
    pub fn source(&self) -> Option<&KeySource> {
        self.cached.as_ref().map(|(_, source)| source)
    }

    /// Resolve the private key, searching at most once per successful result.
    pub fn resolve(&mut self) -> Option<&str> {
        if self.cached.is_none() {
            self.cached = self.search();
        }
        self.cached.as_ref().map(|(key, _)| key.as_str())
    }

    /// Error describing a failed resolution.
    pub fn missing_key_error(&self) -> KeyError {
        KeyError::MissingPrivateKey {
            var: self.var_name(),
            searched: self.searched.clone(),
        }
    }

    /// `.env.keys` candidates in precedence order, de-duplicated.
    pub fn key_file_candidates(&self) -> Vec<PathBuf> {
        let candidates = [
            self.context.directory.clone(),
            self.env.current_dir(),
            self.env.home_dir(),
        ];

        let mut seen: Vec<PathBuf> = Vec::new();
        let mut files = Vec::new();
        for dir in candidates.into_iter().flatten() {
            let file = dir.join(KEYS_FILE);
            let identity = canonical(&dir);
            if seen.contains(&identity) {
                continue;
            }
            seen.push(identity);
            files.push(file);
        }
        files
    }

    fn search(&mut self) -> Option<(Zeroizing<String>, KeySource)> {
        self.searched.clear();

        if let Some(key) = self.context.private_key.as_ref().and_then(|k| usable(k)) {
            debug!(source = "explicit", "private key resolved");
            return Some((key, KeySource::Explicit));
        }

        if let Some(public_key) = self.context.public_key.as_deref().filter(|p| !p.is_empty()) {
            if let Some(store) = self.store.as_ref() {
                if let Some(key) = store.lookup(public_key) {
                    debug!(source = "global-store", "private key resolved");
                    return Some((key, KeySource::GlobalStore));
                }
                self.searched.push(store.path().to_path_buf());
            }
        }

        let var = self.var_name();
        if let Some(key) = self.env.var(&var).and_then(|v| usable(&v)) {
            debug!(source = "environment", %var, "private key resolved");
            return Some((key, KeySource::Environment(var)));
        }

        for file in self.key_file_candidates() {
            self.searched.push(file.clone());
            if let Some(key) = read_key_file(&file, &var) {
                debug!(source = "key-file", path = %file.display(), "private key resolved");
                return Some((key, KeySource::KeyFile(file)));
            }
        }

        debug!(%var, searched = self.searched.len(), "no private key found");
        None
    }
}

/// Trimmed, non-empty key.
fn usable(raw: &str) -> Option<Zeroizing<String>> {
    let key = trim_private_key(raw.trim());
    if key.is_empty() {
        None
    } else {
        Some(Zeroizing::new(key.to_string()))
    }
}

/// Look up `var` in a `.env.keys` file; absent or unreadable files miss.
fn read_key_file(path: &Path, var: &str) -> Option<Zeroizing<String>> {
    if !path.is_file() {
        return None;
    }
    let contents = Zeroizing::new(std::fs::read_to_string(path).ok()?);
    let entries = env::parse(&contents, false).ok()?;
    entries.get(var).and_then(usable)
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
