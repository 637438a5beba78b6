//! Cafe Core - Shared types library.
//!
//! This crate provides the types shared by every cafe API component:
//! - `server` - The JSON HTTP service
//! - `cli` - Command-line tools for schema setup and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the amenity flag coercion rule

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
