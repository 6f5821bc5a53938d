use lazydi_core::{InjectOptions, Injectable, Injector, Result, Token};

use crate::provider::Provider;
use crate::registry::Registry;
use crate::resolver::Resolver;

/// A container of providers.
///
/// Providers can be registered in any order, and at any time: nothing is realized until a
/// token is resolved. Every call to [`inject`](Self::inject) (and its variants) starts a new
/// resolution with its own dependency chain, so the container can be shared between threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use lazydi::{Class, Container, Injectable, Injector, Result};
///
/// #[derive(Clone, Debug, PartialEq, Eq)]
/// struct Address(&'static str);
///
/// #[derive(Clone, Debug)]
/// struct Database {
///     // ...
/// #    inner: Arc<Address>,
/// }
///
/// impl Database {
///     fn address(&self) -> &Address {
///         // ...
/// #         &self.inner
///     }
/// }
///
/// impl Injectable for Database {
///     fn construct<I>(injector: &mut I) -> Result<Self>
///     where
///         I: Injector + ?Sized,
///     {
///         let address = injector.inject_type::<Address>()?;
///         Ok(Self { inner: Arc::new(address) })
///     }
/// }
///
/// // `Database` is registered before the address it depends on.
/// let container = Container::builder()
///     .with_class::<Database>()
///     .with_value(&Class::<Address>::of(), Address("foo"))
///     .build();
///
/// let db = container.inject_type::<Database>()?;
/// assert_eq!(db.address(), &Address("foo"));
/// # Ok::<(), lazydi::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Container {
    registry: Registry,
}

/// A builder for [`Container`].
#[derive(Debug, Default)]
#[must_use]
pub struct ContainerBuilder {
    providers: Vec<Provider>,
}

impl Container {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new builder for `Container`.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::default()
    }

    /// Returns the underlying registry.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers a provider, replacing any provider previously registered for its token.
    pub fn provide<P>(&self, provider: P)
    where
        P: Into<Provider>,
    {
        provider.into().install(&self.registry);
    }

    /// Returns a resolver starting a new resolution.
    pub const fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.registry)
    }

    /// Resolves `token`.
    ///
    /// # Errors
    ///
    /// See [`Injector::inject_with`].
    pub fn inject<K>(&self, token: &K) -> Result<K::Value>
    where
        K: Token + ?Sized,
    {
        self.resolver().inject(token)
    }

    /// Resolves `token` with the given options.
    ///
    /// # Errors
    ///
    /// See [`Injector::inject_with`].
    pub fn inject_with<K>(&self, token: &K, options: InjectOptions<K::Value>) -> Result<K::Value>
    where
        K: Token + ?Sized,
    {
        self.resolver().inject_with(token, options)
    }

    /// Resolves `token`, returning `Ok(None)` if it has no provider.
    ///
    /// # Errors
    ///
    /// See [`Injector::inject_optional`].
    pub fn inject_optional<K>(&self, token: &K) -> Result<Option<K::Value>>
    where
        K: Token + ?Sized,
    {
        self.resolver().inject_optional(token)
    }

    /// Resolves the class token of `T`.
    ///
    /// # Errors
    ///
    /// See [`Injector::inject_with`].
    pub fn inject_type<T>(&self) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.resolver().inject_type()
    }
}

impl ContainerBuilder {
    /// Registers a provider to the container.
    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: Into<Provider>,
    {
        self.providers.push(provider.into());
        self
    }

    /// Binds `token` to a constant value.
    pub fn with_value<K>(self, token: &K, value: K::Value) -> Self
    where
        K: Token + ?Sized,
    {
        self.with_provider(Provider::value(token, value))
    }

    /// Binds `token` to a factory.
    pub fn with_factory<K, F>(self, token: &K, factory: F) -> Self
    where
        K: Token + ?Sized,
        F: Fn(&mut Resolver<'_>) -> Result<K::Value> + Send + Sync + 'static,
    {
        self.with_provider(Provider::factory(token, factory))
    }

    /// Binds class `C` to itself.
    pub fn with_class<C>(self) -> Self
    where
        C: Injectable,
    {
        self.with_provider(Provider::of::<C>())
    }

    /// Finalizes the building process and returns the built container.
    ///
    /// Providers are installed in registration order, so a later provider for a token replaces
    /// an earlier one.
    pub fn build(self) -> Container {
        let container = Container::new();
        for provider in self.providers {
            container.provide(provider);
        }
        container
    }
}
