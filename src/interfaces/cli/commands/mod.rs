//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod entries;
mod hash_password;

pub use config_gen::config_generate;
pub use entries::{add_entry, list_entries};
pub use hash_password::{hash_password, read_password};
