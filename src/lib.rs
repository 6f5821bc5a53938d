//! Lazy dependency injection with circular dependency detection.
//!
//! Tokens ([`Class`] or [`InjectionToken`]) are bound to providers (a constant value, a
//! factory, or an [`Injectable`] class) in a [`Container`]. Providers are only realized when
//! their token is first resolved, and the produced value is kept for every later resolution.
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
pub(crate) mod macros;

pub mod container;
pub mod entry;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod stack;

#[doc(inline)]
pub use lazydi_core::{
    Class, DependencyChain, Erased, Error, InjectOptions, Injectable, InjectionToken, Injector,
    Result, Token, TokenKey,
};

pub use container::{Container, ContainerBuilder};
pub use entry::{Entry, EntryKind};
pub use provider::Provider;
pub use registry::Registry;
pub use resolver::Resolver;
pub use stack::ResolutionStack;
