//! A process-wide default [`Container`].
//!
//! The container is created on first access and lives until the process exits. It is meant
//! for applications that do not want to pass a container around; libraries and tests should
//! prefer their own [`Container`].
//!
//! ```
//! use lazydi::{InjectionToken, Provider};
//! use lazydi_util::{inject, provide};
//!
//! let level = InjectionToken::<&'static str>::new("LOG_LEVEL");
//! provide(Provider::value(&level, "debug"));
//!
//! assert_eq!(inject(&level)?, "debug");
//! # Ok::<(), lazydi::Error>(())
//! ```

use std::sync::LazyLock;

use lazydi::{Container, InjectOptions, Provider, Result, Token};

static CONTAINER: LazyLock<Container> = LazyLock::new(Container::new);

/// Returns the process-wide container.
pub fn container() -> &'static Container {
    &CONTAINER
}

/// Registers a provider to the process-wide container.
///
/// See [`Container::provide`].
pub fn provide<P>(provider: P)
where
    P: Into<Provider>,
{
    container().provide(provider);
}

/// Resolves `token` from the process-wide container.
///
/// # Errors
///
/// See [`Container::inject`].
pub fn inject<K>(token: &K) -> Result<K::Value>
where
    K: Token + ?Sized,
{
    container().inject(token)
}

/// Resolves `token` from the process-wide container with the given options.
///
/// # Errors
///
/// See [`Container::inject_with`].
pub fn inject_with<K>(token: &K, options: InjectOptions<K::Value>) -> Result<K::Value>
where
    K: Token + ?Sized,
{
    container().inject_with(token, options)
}

/// Resolves `token` from the process-wide container, returning `Ok(None)` if it has no
/// provider.
///
/// # Errors
///
/// See [`Container::inject_optional`].
pub fn inject_optional<K>(token: &K) -> Result<Option<K::Value>>
where
    K: Token + ?Sized,
{
    container().inject_optional(token)
}

/// Resolves the class token of `T` from the process-wide container.
///
/// # Errors
///
/// See [`Container::inject_type`].
pub fn inject_type<T>() -> Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    container().inject_type()
}
