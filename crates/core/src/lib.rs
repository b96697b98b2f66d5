//! Domain layer for the charcut catalog backend.
//!
//! Holds the categorized listing catalog with its file-backed snapshot
//! ([`catalog`]) and the store for uploaded image blobs ([`assets`]).
//! No HTTP types live here; the `charcut-api` crate wires these into
//! request handlers.

pub mod assets;
pub mod catalog;
pub mod error;
pub mod types;
