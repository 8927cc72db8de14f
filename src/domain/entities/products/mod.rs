//! Product Entity Module

pub mod product;

pub use product::*;
