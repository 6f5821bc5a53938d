//! Utilities built on top of `lazydi`.
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]

pub mod global;

pub use global::{container, inject, inject_optional, inject_type, inject_with, provide};
