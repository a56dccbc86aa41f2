//! Domain types.

mod entry;
pub mod env;
pub mod properties;

pub use entry::{Entries, Entry};
pub use env::Env;
