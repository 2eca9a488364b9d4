//! Repository implementations

pub mod finance;
