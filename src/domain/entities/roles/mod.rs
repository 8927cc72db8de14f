//! Roles Entity Module

pub mod role;

pub use role::*;
