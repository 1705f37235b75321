//! DEVIS - Terminal Quote Builder
//!
//! A terminal application for composing custom workwear packs and
//! requesting quotes, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
