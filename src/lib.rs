//! dailyqr - one QR code per day
//!
//! Serves a single redirect target per calendar day, behind a QR code that
//! points at a stable per-entry URL, with an admin-gated queue for
//! scheduling future entries.
//!
//! # Architecture
//! - `services`: scheduling, QR rendering, image cache, admin gate
//! - `storage`: SeaORM entry store
//! - `api`: HTTP routes and middleware
//! - `interfaces`: management CLI
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
