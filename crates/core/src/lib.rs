//! Hearth Core - Shared types library.
//!
//! This crate provides common types used across all Hearth components:
//! - `storefront` - Gateway server plus the headless browse client
//! - `cli` - Command-line tools for migrations and smoke runs
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product wire types, the cart, and price display

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
