//! `stockpile-core` — domain building blocks shared by the inventory store.
//!
//! This crate contains **pure domain** primitives (no IO).

pub mod error;
pub mod name;

pub use error::{DomainError, DomainResult};
pub use name::ItemName;
