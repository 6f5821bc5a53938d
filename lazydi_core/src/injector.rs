//! [`Injector`] and [`Injectable`] traits.

use crate::error::Result;
use crate::token::{Class, Token};

/// Options for a single resolution.
#[derive(Debug, Clone)]
pub struct InjectOptions<T> {
    default_value: Option<T>,
}

impl<T> InjectOptions<T> {
    /// Creates options without a default value.
    pub const fn new() -> Self {
        Self {
            default_value: None,
        }
    }

    /// Creates options that fall back to `value` when the token has no provider.
    ///
    /// The default only replaces a missing provider. Any other failure, including a circular
    /// dependency, is still returned as an error.
    pub const fn default_value(value: T) -> Self {
        Self {
            default_value: Some(value),
        }
    }

    pub fn into_default_value(self) -> Option<T> {
        self.default_value
    }
}

impl<T> Default for InjectOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves tokens into values.
///
/// Factories and [`Injectable`] constructors receive the injector that is realizing them and
/// request their own dependencies through it.
pub trait Injector {
    /// Resolves `token` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingProvider`](crate::Error::MissingProvider) if `token` has no
    /// provider and `options` has no default value,
    /// [`Error::CircularDependency`](crate::Error::CircularDependency) if `token` is already
    /// being realized, or the error of a failing factory or constructor.
    fn inject_with<K>(&mut self, token: &K, options: InjectOptions<K::Value>) -> Result<K::Value>
    where
        K: Token + ?Sized;

    /// Resolves `token`.
    ///
    /// # Errors
    ///
    /// See [`inject_with`](Self::inject_with).
    #[inline]
    fn inject<K>(&mut self, token: &K) -> Result<K::Value>
    where
        K: Token + ?Sized,
    {
        self.inject_with(token, InjectOptions::new())
    }

    /// Resolves `token`, returning `Ok(None)` if `token` has no provider.
    ///
    /// Missing providers of the dependencies of `token` are still reported as errors.
    ///
    /// # Errors
    ///
    /// See [`inject_with`](Self::inject_with).
    fn inject_optional<K>(&mut self, token: &K) -> Result<Option<K::Value>>
    where
        K: Token + ?Sized,
    {
        match self.inject(token) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_missing_provider_for(&token.key()) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Resolves the class token of `T`.
    ///
    /// # Errors
    ///
    /// See [`inject_with`](Self::inject_with).
    #[inline]
    fn inject_type<T>(&mut self) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.inject(&Class::<T>::of())
    }
}

impl<I> Injector for &mut I
where
    I: Injector + ?Sized,
{
    #[inline]
    fn inject_with<K>(&mut self, token: &K, options: InjectOptions<K::Value>) -> Result<K::Value>
    where
        K: Token + ?Sized,
    {
        (**self).inject_with(token, options)
    }
}

/// A type that can be instantiated by the container, taking its dependencies from the
/// injector realizing it.
///
/// # Example
///
/// ```
/// use lazydi_core::{InjectionToken, Injectable, Injector, Result};
///
/// # fn level_token() -> InjectionToken<&'static str> { InjectionToken::new("LOG_LEVEL") }
/// #[derive(Clone)]
/// struct Logger {
///     level: &'static str,
/// }
///
/// impl Injectable for Logger {
///     fn construct<I>(injector: &mut I) -> Result<Self>
///     where
///         I: Injector + ?Sized,
///     {
///         let level = injector.inject(&level_token())?;
///         Ok(Self { level })
///     }
/// }
/// ```
pub trait Injectable: Clone + Send + Sync + Sized + 'static {
    /// Creates an instance, requesting dependencies from `injector`.
    ///
    /// # Errors
    ///
    /// Errors raised while resolving dependencies should be propagated as they are, so that
    /// circular dependencies abort the whole resolution.
    fn construct<I>(injector: &mut I) -> Result<Self>
    where
        I: Injector + ?Sized;
}
