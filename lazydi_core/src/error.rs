//! Error types.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::token::TokenKey;

/// [`Error`] is an error that can be raised by functions and methods from this library.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A token was resolved without a provider and without a default value.
    #[error("No provider for {0}")]
    MissingProvider(TokenKey),
    /// A token was requested again while it was still being realized.
    #[error("Circular dependency: {0}")]
    CircularDependency(DependencyChain),
    /// A token resolved to a value that is not of its value type, because another token
    /// shares its key.
    #[error("Type mismatch for {token}: expected {expected}, found {found}")]
    TypeMismatch {
        token: TokenKey,
        expected: &'static str,
        found: &'static str,
    },
    /// A factory or constructor failed on its own.
    #[error("{0}")]
    Other(#[source] Arc<dyn StdError + Send + Sync + 'static>),
}

impl Error {
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Other(Arc::from(err.into()))
    }

    pub const fn is_missing_provider(&self) -> bool {
        matches!(self, Self::MissingProvider(_))
    }

    /// Returns `true` if this error reports that `key` itself has no provider.
    pub fn is_missing_provider_for(&self, key: &TokenKey) -> bool {
        matches!(self, Self::MissingProvider(missing) if missing == key)
    }

    pub const fn is_circular_dependency(&self) -> bool {
        matches!(self, Self::CircularDependency(_))
    }

    /// Returns the offending chain if this is a circular dependency error.
    pub const fn dependency_chain(&self) -> Option<&DependencyChain> {
        match self {
            Self::CircularDependency(chain) => Some(chain),
            _ => None,
        }
    }

    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    pub const fn is_other(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

/// The tokens of a circular dependency, in the order they were requested.
///
/// The repeated token appears both first and last, e.g. `class A -> class B -> class A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChain(Vec<TokenKey>);

impl DependencyChain {
    pub const fn new(tokens: Vec<TokenKey>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[TokenKey] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DependencyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = self.0.iter();
        if let Some(first) = tokens.next() {
            write!(f, "{first}")?;
        }
        for token in tokens {
            write!(f, " -> {token}")?;
        }
        Ok(())
    }
}

/// [`Result`] is an alias to [`core::result::Result`] with [`Error`] as the
/// default error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
