//! Registry of provider entries, keyed by token identity.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazydi_core::{Erased, Injectable, Result, Token, TokenKey};

use crate::entry::{Entry, EntryKind};
use crate::resolver::Resolver;

/// [`Registry`] maps tokens to their provider [`Entry`].
///
/// Each token has at most one entry. Every `set_*` method replaces whatever entry the token
/// had before, regardless of its kind.
///
/// The registry never runs user code itself: factories and classes are only realized by a
/// [`Resolver`]. No lock is held while that happens, so factories are free to register or
/// resolve other tokens.
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<TokenKey, Entry>>,
}

impl Registry {
    /// Creates an empty [`Registry`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `token` to a constant value.
    pub fn set_value<K>(&self, token: &K, value: K::Value)
    where
        K: Token + ?Sized,
    {
        self.insert(token.key(), Entry::value(value));
    }

    /// Binds `token` to a factory, called on first resolution.
    pub fn set_factory<K, F>(&self, token: &K, factory: F)
    where
        K: Token + ?Sized,
        F: Fn(&mut Resolver<'_>) -> Result<K::Value> + Send + Sync + 'static,
    {
        self.insert(token.key(), Entry::factory(factory));
    }

    /// Binds `token` to class `C`, constructed on first resolution and converted into the
    /// value type of `token`.
    pub fn set_class<C, K>(&self, token: &K)
    where
        C: Injectable,
        K: Token + ?Sized,
        K::Value: From<C>,
    {
        self.insert(token.key(), Entry::class::<C, K::Value>());
    }

    /// Returns the entry currently bound to `token`.
    pub fn get_entry<K>(&self, token: &K) -> Option<Entry>
    where
        K: Token + ?Sized,
    {
        self.get_entry_by_key(&token.key())
    }

    /// Returns the entry currently bound to `key`.
    pub fn get_entry_by_key(&self, key: &TokenKey) -> Option<Entry> {
        self.read().get(key).cloned()
    }

    /// Returns the kind of the entry bound to `key`.
    pub fn entry_kind(&self, key: &TokenKey) -> Option<EntryKind> {
        self.read().get(key).map(Entry::kind)
    }

    /// Returns `true` if `token` has an entry.
    pub fn contains<K>(&self, token: &K) -> bool
    where
        K: Token + ?Sized,
    {
        self.contains_key(&token.key())
    }

    /// Returns `true` if `key` has an entry.
    pub fn contains_key(&self, key: &TokenKey) -> bool {
        self.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Installs `entry` for `key`, returning the replaced entry.
    pub(crate) fn insert(&self, key: TokenKey, entry: Entry) -> Option<Entry> {
        trace!(token = %key, kind = %entry.kind(), "set entry");
        self.write().insert(key, entry)
    }

    /// Replaces the entry of `key` with the value it was realized into.
    pub(crate) fn memoize(&self, key: TokenKey, value: Erased) {
        trace!(token = %key, "memoize");
        self.write().insert(key, Entry::Value(value));
    }

    // A poisoned lock only means a writer panicked between two map operations; the map itself
    // is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<TokenKey, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TokenKey, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.read();
        f.debug_map()
            .entries(entries.iter().map(|(key, entry)| (key, entry.kind())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use lazydi_core::{Class, InjectionToken, Injector};

    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Logger(&'static str);

    impl Injectable for Logger {
        fn construct<I>(_: &mut I) -> Result<Self>
        where
            I: Injector + ?Sized,
        {
            Ok(Self("constructed"))
        }
    }

    #[test]
    fn test_set_and_get() {
        let registry = Registry::new();
        let level = InjectionToken::<&'static str>::new("LOG_LEVEL");
        assert!(registry.get_entry(&level).is_none());
        assert!(registry.is_empty());

        registry.set_value(&level, "debug");
        let entry = registry.get_entry(&level).unwrap();
        assert_eq!(entry.kind(), EntryKind::Value);
        assert_eq!(entry.as_value().unwrap().downcast_ref(), Some(&"debug"));
        assert!(registry.contains(&level));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_set_replaces_any_kind() {
        let registry = Registry::new();
        let token = InjectionToken::<Logger>::new("LOGGER");

        registry.set_value(&token, Logger("value"));
        registry.set_factory(&token, |_| Ok(Logger("factory")));
        assert_eq!(registry.entry_kind(&token.key()), Some(EntryKind::Factory));

        registry.set_class::<Logger, _>(&token);
        assert_eq!(registry.entry_kind(&token.key()), Some(EntryKind::Class));

        registry.set_value(&token, Logger("value"));
        assert_eq!(registry.entry_kind(&token.key()), Some(EntryKind::Value));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_class_token_is_self_key() {
        let registry = Registry::new();
        registry.set_class::<Logger, _>(&Class::<Logger>::of());
        assert!(registry.contains_key(&TokenKey::of_class::<Logger>()));
        assert!(!registry.contains(&InjectionToken::<Logger>::new("Logger")));
    }

    #[test]
    fn test_setting_does_not_call_factory() {
        let registry = Registry::new();
        let token = InjectionToken::<u32>::new("COUNT");
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        registry.set_factory(&token, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        });
        let _ = registry.get_entry(&token);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_memoize_downgrades_to_value() {
        let registry = Registry::new();
        let token = InjectionToken::<u32>::new("COUNT");
        registry.set_factory(&token, |_| Ok(1));

        registry.memoize(token.key(), Erased::new(7_u32));
        let entry = registry.get_entry(&token).unwrap();
        assert_eq!(entry.as_value().unwrap().downcast_ref::<u32>(), Some(&7));
    }

    #[test]
    fn test_debug_lists_kinds() {
        let registry = Registry::new();
        registry.set_value(&InjectionToken::<bool>::new("VERBOSE"), true);
        let debug = format!("{registry:?}");
        assert!(debug.contains("VERBOSE"));
        assert!(debug.contains("Value"));
    }
}
