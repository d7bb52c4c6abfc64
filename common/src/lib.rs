//! # Knockr Common
//!
//! Shared domain types for the scanner: the validated [`config::ScanConfig`],
//! the scan target and port range models under [`network`], and the per-port
//! task and result records in [`models`].

pub mod config;
pub mod error;
pub mod models;
pub mod network;
