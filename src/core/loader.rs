//! Configuration loading.
//!
//! [`Loader`] is the entry point of the library: it reads one `.env` or
//! properties file, resolves the private key for it and returns the fully
//! decrypted [`Dotenv`].
//!
//! ```no_run
//! use envcrypt::Loader;
//!
//! let dotenv = Loader::new()
//!     .directory("config")
//!     .filename(".env.production")
//!     .load()?;
//! let url = dotenv.get("DATABASE_URL");
//! # Ok::<(), envcrypt::error::Error>(())
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::bind::{self, KeyNaming};
use crate::core::cipher::Ecies;
use crate::core::constants::ENV_FILE;
use crate::core::decrypt::decrypt_all;
use crate::core::domain::{properties, Entries, Entry, Env};
use crate::core::keystore::GlobalKeyStore;
use crate::core::profile::{self, SourceKind};
use crate::core::resolver::{Environment, KeyContext, Resolver, SystemEnvironment};
use crate::error::{LoadError, Result};

/// Builder for one load operation.
pub struct Loader<E: Environment = SystemEnvironment> {
    directory: PathBuf,
    filename: String,
    private_key: Option<Zeroizing<String>>,
    ignore_missing: bool,
    ignore_malformed: bool,
    export: bool,
    store: Option<GlobalKeyStore>,
    env: E,
}

impl Loader<SystemEnvironment> {
    /// Loader for `./.env` over the process environment.
    pub fn new() -> Self {
        Self {
            directory: PathBuf::from("."),
            filename: ENV_FILE.to_string(),
            private_key: None,
            ignore_missing: false,
            ignore_malformed: false,
            export: false,
            store: None,
            env: SystemEnvironment,
        }
    }

    /// Loader for a full file path.
    pub fn path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ENV_FILE.to_string());

        Self::new().directory(directory).filename(filename)
    }
}

impl Default for Loader<SystemEnvironment> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> Loader<E> {
    /// Directory holding the configuration file.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Configuration filename. `.properties` files are read as properties.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Use this private key instead of searching for one.
    pub fn private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(Zeroizing::new(key.into()));
        self
    }

    /// Treat a missing file as empty.
    pub fn ignore_if_missing(mut self) -> Self {
        self.ignore_missing = true;
        self
    }

    /// Skip malformed `.env` lines instead of failing.
    pub fn ignore_if_malformed(mut self) -> Self {
        self.ignore_malformed = true;
        self
    }

    /// Set every loaded entry in the process environment.
    pub fn export(mut self) -> Self {
        self.export = true;
        self
    }

    /// Use an explicit global key store.
    pub fn key_store(mut self, store: GlobalKeyStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Resolve keys against a custom environment.
    pub fn with_environment<F: Environment>(self, env: F) -> Loader<F> {
        Loader {
            directory: self.directory,
            filename: self.filename,
            private_key: self.private_key,
            ignore_missing: self.ignore_missing,
            ignore_malformed: self.ignore_malformed,
            export: self.export,
            store: self.store,
            env,
        }
    }

    /// Full path of the configuration file.
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// Read, resolve and decrypt the configuration file.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` for a missing file (unless ignored),
    /// `LoadError::Malformed` for an invalid `.env` line (unless ignored),
    /// `KeyError::MissingPrivateKey` if encrypted values exist but no key
    /// resolves, or `LoadError::DecryptionFailed` for a rejected value.
    pub fn load(self) -> Result<Dotenv> {
        let path = self.file_path();
        let kind = SourceKind::detect(&self.filename);

        debug!(path = %path.display(), ?kind, "loading configuration");

        let entries = if path.is_file() {
            match kind {
                SourceKind::Env => Env::load(&path, !self.ignore_malformed)?.into_entries(),
                SourceKind::Properties => properties::load(&path)?,
            }
        } else if self.ignore_missing {
            debug!(path = %path.display(), "configuration file missing, continuing empty");
            Entries::new()
        } else {
            return Err(LoadError::NotFound(path).into());
        };

        let public_key = match kind {
            SourceKind::Properties => properties::declared_public_key(&entries).map(str::to_string),
            SourceKind::Env => None,
        };
        let context = KeyContext {
            private_key: self.private_key,
            profile: profile::extract(kind, &self.filename),
            public_key,
            directory: Some(self.directory),
        };

        let mut resolver = Resolver::with_environment(context, self.env);
        if let Some(store) = self.store {
            resolver = resolver.with_store(store);
        }

        let entries = decrypt_all(entries, &mut resolver, &Ecies)?;

        if self.export {
            for entry in &entries {
                std::env::set_var(&entry.key, &entry.value);
            }
            debug!(count = entries.len(), "entries exported to process environment");
        }

        Ok(Dotenv {
            entries,
            kind,
            path,
        })
    }
}

/// A loaded, fully decrypted configuration.
#[derive(Clone)]
pub struct Dotenv {
    entries: Entries,
    kind: SourceKind,
    path: PathBuf,
}

impl Dotenv {
    /// Value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    /// All entries in file order
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source file family
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Copy all entries into a map.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.to_pairs().into_iter().collect()
    }

    pub fn into_entries(self) -> Entries {
        self.entries
    }

    /// Deserialize the entries onto a typed structure.
    ///
    /// Field names follow the source's naming: `API_KEY` for `.env` files,
    /// `api.key` for properties files.
    ///
    /// # Errors
    ///
    /// Returns `BindError` if a field is missing or a value does not parse.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T> {
        bind::from_entries(&self.entries, KeyNaming::from(self.kind))
    }
}

impl std::fmt::Debug for Dotenv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dotenv")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Dotenv {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
