//! Lazy, memoizing resolution of tokens.

use std::any::type_name;

use lazydi_core::{Error, InjectOptions, Injector, Result, Token, TokenKey};

use crate::entry::Entry;
use crate::registry::Registry;
use crate::stack::ResolutionStack;

/// Resolves tokens against a [`Registry`].
///
/// A resolver is created for every top-level resolution (see
/// [`Container::inject`](crate::Container::inject)) and handed to the factories and
/// constructors it realizes, which resolve their own dependencies through it. Its
/// [`ResolutionStack`] therefore records exactly the chain of tokens leading to the current
/// realization.
///
/// Resolving a token goes as follows:
///
/// 1. If the token has no entry, the default value of the options is returned if there is one.
///    Otherwise, [`Error::MissingProvider`] is returned.
/// 2. A value entry is returned as is.
/// 3. A factory or class entry is realized, unless the token is already being realized, in
///    which case [`Error::CircularDependency`] is returned. On success, the entry is replaced
///    by the produced value so that it is never realized again.
/// 4. The value is handed out if it is of the value type of the token. Otherwise, another token
///    shares the same key and [`Error::TypeMismatch`] is returned.
#[derive(Debug)]
pub struct Resolver<'a> {
    registry: &'a Registry,
    stack: ResolutionStack,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver with an empty stack.
    pub const fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            stack: ResolutionStack::new(),
        }
    }

    /// Returns the registry this resolver resolves against.
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Returns the tokens currently being realized.
    pub const fn stack(&self) -> &ResolutionStack {
        &self.stack
    }

    /// Resolves `token` with the given options.
    ///
    /// # Errors
    ///
    /// See [`Injector::inject_with`].
    pub fn resolve<K>(&mut self, token: &K, options: InjectOptions<K::Value>) -> Result<K::Value>
    where
        K: Token + ?Sized,
    {
        let key = token.key();

        let Some(entry) = self.registry.get_entry_by_key(&key) else {
            if let Some(value) = options.into_default_value() {
                trace!(token = %key, "default value");
                return Ok(value);
            }

            debug!(token = %key, "missing provider");
            return Err(Error::MissingProvider(key));
        };

        let value = match entry {
            Entry::Value(value) => {
                trace!(token = %key, "value");
                value
            }
            Entry::Factory(realizer) | Entry::Class(realizer) => {
                let value = self.guard(&key, |resolver| {
                    #[cfg(feature = "tracing")]
                    let _span = tracing::debug_span!(
                        "realize",
                        token = %key,
                        provider = realizer.type_name(),
                    )
                    .entered();

                    realizer.realize(resolver)
                })?;
                self.registry.memoize(key.clone(), value.clone());
                value
            }
        };

        value.downcast::<K::Value>().map_err(|value| {
            warn!(token = %key, found = value.type_name(), "type mismatch");
            Error::TypeMismatch {
                token: key,
                expected: type_name::<K::Value>(),
                found: value.type_name(),
            }
        })
    }

    /// Runs `realize` with `key` marked as being realized.
    fn guard<T, F>(&mut self, key: &TokenKey, realize: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let depth = self.stack.depth();
        self.stack.enter(key.clone())?;
        let result = realize(self);
        self.stack.exit(depth);
        result
    }
}

impl Injector for Resolver<'_> {
    #[inline]
    fn inject_with<K>(&mut self, token: &K, options: InjectOptions<K::Value>) -> Result<K::Value>
    where
        K: Token + ?Sized,
    {
        self.resolve(token, options)
    }
}
