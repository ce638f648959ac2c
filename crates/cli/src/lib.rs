//! `stockpile` binary support: the fixed demonstration run.

pub mod demo;
