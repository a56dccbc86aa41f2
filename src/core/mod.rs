//! Core library components.
//!
//! This module contains the reusable logic for reading configuration files,
//! resolving private keys and decrypting `encrypted:` values.

pub mod bind;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod decrypt;
pub mod domain;
pub mod keystore;
pub mod loader;
pub mod profile;
pub mod resolver;
pub mod types;
