//! Domain models for the cafe server.

pub mod cafe;

pub use cafe::{Cafe, NewCafe};
