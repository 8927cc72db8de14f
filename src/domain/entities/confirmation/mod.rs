//! Confirmation Code Entity Module

pub mod confirmation_code;

pub use confirmation_code::*;
