//! Hearth Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused: the gateway routes, the cart
//! persistence layer, and the headless browse client.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browse;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;
