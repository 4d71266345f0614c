//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-client`). Host applications can depend on
//! `credman-workspace` with the default `client` feature and get the full
//! authentication facade without wiring each crate individually.

#[cfg(feature = "client")]
pub use core_client as client;
