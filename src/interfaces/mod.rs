//! User interfaces
//!
//! - `cli`: one-shot management commands

pub mod cli;
