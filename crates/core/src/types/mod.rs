//! Core types for the cafe API.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amenity;
pub mod id;

pub use amenity::{TRUTHY_VALUES, coerce_flag};
pub use id::*;
