//! # Knockr Core
//!
//! The bounded-concurrency TCP connect scan engine.
//!
//! * **[`gate`]**: the admission gate limiting how many probes run at once.
//! * **[`network`]**: the socket-level connect probe.
//! * **[`scanner`]**: the dispatcher tying both together into a full scan.

pub mod gate;
pub mod network;
pub mod scanner;
