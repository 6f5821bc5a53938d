//! Bindings of tokens to providers.

use lazydi_core::{Class, Injectable, Result, Token, TokenKey};

use crate::entry::{Entry, EntryKind};
use crate::registry::Registry;
use crate::resolver::Resolver;

/// A token together with the entry it should be bound to.
///
/// Providers are created with [`value`](Self::value), [`factory`](Self::factory),
/// [`class`](Self::class) or [`of`](Self::of), and installed with
/// [`Container::provide`](crate::Container::provide). A bare [`Class`] converts into the
/// provider binding the class to itself.
///
/// # Example
///
/// ```
/// use lazydi::{Class, Container, InjectionToken, Injectable, Injector, Provider, Result};
///
/// #[derive(Clone)]
/// struct Logger;
///
/// impl Injectable for Logger {
///     fn construct<I>(_: &mut I) -> Result<Self>
///     where
///         I: Injector + ?Sized,
///     {
///         Ok(Self)
///     }
/// }
///
/// let level = InjectionToken::<&'static str>::new("LOG_LEVEL");
/// let prefix = InjectionToken::<String>::new("PREFIX");
///
/// let container = Container::new();
/// container.provide(Class::<Logger>::of());
/// container.provide(Provider::value(&level, "debug"));
/// container.provide(Provider::factory(&prefix, {
///     let level = level.clone();
///     move |resolver| Ok(format!("[{}]", resolver.inject(&level)?))
/// }));
///
/// assert_eq!(container.inject(&prefix)?, "[debug]");
/// # Ok::<(), lazydi::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Provider {
    key: TokenKey,
    entry: Entry,
}

impl Provider {
    /// Binds `token` to a constant value.
    pub fn value<K>(token: &K, value: K::Value) -> Self
    where
        K: Token + ?Sized,
    {
        Self {
            key: token.key(),
            entry: Entry::value(value),
        }
    }

    /// Binds `token` to a factory, called with the resolving [`Resolver`] on first resolution.
    pub fn factory<K, F>(token: &K, factory: F) -> Self
    where
        K: Token + ?Sized,
        F: Fn(&mut Resolver<'_>) -> Result<K::Value> + Send + Sync + 'static,
    {
        Self {
            key: token.key(),
            entry: Entry::factory(factory),
        }
    }

    /// Binds `token` to class `C`.
    pub fn class<C, K>(token: &K) -> Self
    where
        C: Injectable,
        K: Token + ?Sized,
        K::Value: From<C>,
    {
        Self {
            key: token.key(),
            entry: Entry::class::<C, K::Value>(),
        }
    }

    /// Binds class `C` to itself.
    pub fn of<C>() -> Self
    where
        C: Injectable,
    {
        Self::class::<C, _>(&Class::<C>::of())
    }

    /// Returns the token bound by this provider.
    pub const fn key(&self) -> &TokenKey {
        &self.key
    }

    pub const fn kind(&self) -> EntryKind {
        self.entry.kind()
    }

    /// Installs this provider, replacing any entry of its token.
    pub(crate) fn install(self, registry: &Registry) {
        registry.insert(self.key, self.entry);
    }
}

impl<C> From<Class<C>> for Provider
where
    C: Injectable,
{
    fn from(_: Class<C>) -> Self {
        Self::of::<C>()
    }
}

#[cfg(test)]
mod tests {
    use lazydi_core::{InjectionToken, Injector};

    use super::*;

    #[derive(Clone)]
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
    fn test_kinds_and_keys() {
        let level = InjectionToken::<&'static str>::new("LOG_LEVEL");
        let logger = InjectionToken::<Logger>::new("LOGGER");

        let provider = Provider::value(&level, "debug");
        assert_eq!(provider.kind(), EntryKind::Value);
        assert_eq!(provider.key(), &level.key());

        let provider = Provider::factory(&logger, |_| Ok(Logger));
        assert_eq!(provider.kind(), EntryKind::Factory);

        let provider = Provider::class::<Logger, _>(&logger);
        assert_eq!(provider.kind(), EntryKind::Class);
        assert_eq!(provider.key(), &logger.key());
    }

    #[test]
    fn test_shorthand_binds_class_to_itself() {
        let provider = Provider::from(Class::<Logger>::of());
        assert_eq!(provider.kind(), EntryKind::Class);
        assert_eq!(provider.key(), &TokenKey::of_class::<Logger>());
        assert_eq!(Provider::of::<Logger>().key(), provider.key());
    }

    #[test]
    fn test_install_replaces() {
        let registry = Registry::new();
        let level = InjectionToken::<&'static str>::new("LOG_LEVEL");

        Provider::value(&level, "debug").install(&registry);
        Provider::factory(&level, |_| Ok("trace")).install(&registry);

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.entry_kind(&level.key()),
            Some(EntryKind::Factory)
        );
    }
}
