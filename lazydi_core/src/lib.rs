//! Core types and traits for `lazydi` library.
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]

pub mod erased;
pub mod error;
pub mod injector;
pub mod token;

pub use erased::Erased;
pub use error::{DependencyChain, Error, Result};
pub use injector::{InjectOptions, Injectable, Injector};
pub use token::{Class, InjectionToken, Token, TokenKey};
