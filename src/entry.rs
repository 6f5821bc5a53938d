//! Provider entries stored in the registry.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use lazydi_core::{Erased, Injectable, Result};

use crate::resolver::Resolver;

type RealizeFn = dyn Fn(&mut Resolver<'_>) -> Result<Erased> + Send + Sync;

/// The kind of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Value,
    Factory,
    Class,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Value => "value",
            Self::Factory => "factory",
            Self::Class => "class",
        })
    }
}

/// How the value of a token is obtained.
///
/// A token maps to exactly one entry. Factory and class entries are replaced by a value entry
/// once they have been realized.
#[derive(Clone)]
pub enum Entry {
    /// An already computed value.
    Value(Erased),
    /// A function producing the value.
    Factory(Realizer),
    /// A type instantiated through [`Injectable::construct`].
    Class(Realizer),
}

impl Entry {
    pub(crate) fn value<T>(value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self::Value(Erased::new(value))
    }

    pub(crate) fn factory<T, F>(factory: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        Self::Factory(Realizer::new(type_name::<F>(), move |resolver| {
            factory(resolver).map(Erased::new)
        }))
    }

    pub(crate) fn class<C, T>() -> Self
    where
        C: Injectable,
        T: From<C> + Clone + Send + Sync + 'static,
    {
        Self::Class(Realizer::new(type_name::<C>(), |resolver| {
            C::construct(resolver).map(|instance| Erased::new(T::from(instance)))
        }))
    }

    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Value(_) => EntryKind::Value,
            Self::Factory(_) => EntryKind::Factory,
            Self::Class(_) => EntryKind::Class,
        }
    }

    /// Returns the stored value if this is a value entry.
    pub const fn as_value(&self) -> Option<&Erased> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the factory or class to run if this entry still has to be realized.
    pub const fn as_realizer(&self) -> Option<&Realizer> {
        match self {
            Self::Value(_) => None,
            Self::Factory(realizer) | Self::Class(realizer) => Some(realizer),
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(realizer) => f.debug_tuple("Factory").field(realizer).finish(),
            Self::Class(realizer) => f.debug_tuple("Class").field(realizer).finish(),
        }
    }
}

/// The type-erased body of a factory or class entry.
#[derive(Clone)]
pub struct Realizer {
    realize: Arc<RealizeFn>,
    type_name: &'static str,
}

impl Realizer {
    fn new<F>(type_name: &'static str, realize: F) -> Self
    where
        F: Fn(&mut Resolver<'_>) -> Result<Erased> + Send + Sync + 'static,
    {
        Self {
            realize: Arc::new(realize),
            type_name,
        }
    }

    /// Returns the name of the factory function type, or of the class.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn realize(&self, resolver: &mut Resolver<'_>) -> Result<Erased> {
        (self.realize)(resolver)
    }
}

impl fmt::Debug for Realizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Realizer")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use lazydi_core::Injector;

    use crate::registry::Registry;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Logger;

    impl Injectable for Logger {
        fn construct<I>(_: &mut I) -> Result<Self>
        where
            I: Injector + ?Sized,
        {
            Ok(Self)
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Entry::value(1_u8).kind(), EntryKind::Value);
        assert_eq!(
            Entry::factory(|_: &mut Resolver<'_>| Ok(1_u8)).kind(),
            EntryKind::Factory
        );
        assert_eq!(Entry::class::<Logger, Logger>().kind(), EntryKind::Class);
        assert_eq!(EntryKind::Factory.to_string(), "factory");
    }

    #[test]
    fn test_class_realizer_names_class() {
        let entry = Entry::class::<Logger, Logger>();
        let realizer = entry.as_realizer().unwrap();
        assert!(realizer.type_name().ends_with("Logger"));
        assert!(entry.as_value().is_none());
    }

    #[test]
    fn test_realize() {
        let registry = Registry::new();
        let mut resolver = Resolver::new(&registry);

        let entry = Entry::factory(|_: &mut Resolver<'_>| Ok("debug"));
        let value = entry.as_realizer().unwrap().realize(&mut resolver).unwrap();
        assert_eq!(value.downcast::<&str>().unwrap(), "debug");

        let entry = Entry::class::<Logger, Logger>();
        let value = entry.as_realizer().unwrap().realize(&mut resolver).unwrap();
        assert_eq!(value.downcast::<Logger>().unwrap(), Logger);
    }
}
