//! Tokens identifying registry entries.
//!
//! A token is either the identity of a type ([`Class`]) or an opaque, explicitly constructed
//! [`InjectionToken`]. Both compare by identity only: two injection tokens with the same
//! description are different keys.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(0);

/// A typed token that can be resolved into a value of type [`Value`](Self::Value).
pub trait Token {
    /// The type of the value bound to this token.
    type Value: Clone + Send + Sync + 'static;

    /// Returns the untyped identity of this token.
    ///
    /// Tokens returning the same key resolve to the same entry, so they must agree on
    /// [`Value`](Self::Value). Otherwise resolving them fails with
    /// [`Error::TypeMismatch`](crate::Error::TypeMismatch).
    fn key(&self) -> TokenKey;
}

/// The untyped identity of a token.
///
/// This is what the registry is keyed by, and what errors carry to describe the tokens
/// involved.
#[derive(Clone)]
pub struct TokenKey(Repr);

#[derive(Clone)]
enum Repr {
    Class {
        type_id: TypeId,
        type_name: &'static str,
    },
    Opaque {
        id: u64,
        description: Arc<str>,
    },
}

impl TokenKey {
    /// Returns the key of the class token of type `T`.
    pub fn of_class<T>() -> Self
    where
        T: 'static,
    {
        Self(Repr::Class {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        })
    }
}

impl PartialEq for TokenKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Class { type_id: a, .. }, Repr::Class { type_id: b, .. }) => a == b,
            (Repr::Opaque { id: a, .. }, Repr::Opaque { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for TokenKey {}

impl Hash for TokenKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Repr::Class { type_id, .. } => {
                state.write_u8(0);
                type_id.hash(state);
            }
            Repr::Opaque { id, .. } => {
                state.write_u8(1);
                id.hash(state);
            }
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Class { type_name, .. } => write!(f, "class {}", short_type_name(type_name)),
            Repr::Opaque { description, .. } => write!(f, "InjectionToken({description})"),
        }
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Class { type_name, .. } => f.debug_tuple("Class").field(type_name).finish(),
            Repr::Opaque { id, description } => f
                .debug_struct("Opaque")
                .field("id", id)
                .field("description", description)
                .finish(),
        }
    }
}

/// Strips the module path from the outermost segment of a type name.
///
/// Generic arguments are kept as they are, e.g. `alloc::sync::Arc<app::Db>` becomes
/// `Arc<app::Db>`.
fn short_type_name(full: &str) -> &str {
    let end = full.find('<').unwrap_or(full.len());
    let start = full[..end].rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}

/// An opaque token, used when no natural type exists to identify a value (e.g. to bind a
/// primitive or a trait object).
///
/// Every call to [`InjectionToken::new`] creates a new identity. Cloning a token does not:
/// the clone is the same token.
///
/// ```
/// use lazydi_core::{InjectionToken, Token};
///
/// let level = InjectionToken::<&'static str>::new("LOG_LEVEL");
/// let other = InjectionToken::<&'static str>::new("LOG_LEVEL");
///
/// assert_eq!(level.key(), level.clone().key());
/// assert_ne!(level.key(), other.key());
/// assert_eq!(level.to_string(), "InjectionToken(LOG_LEVEL)");
/// ```
pub struct InjectionToken<T> {
    id: u64,
    description: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> InjectionToken<T> {
    /// Creates a new token with a fresh identity.
    ///
    /// `description` is only used for diagnostics.
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed),
            description: description.into(),
            _marker: PhantomData,
        }
    }

    /// Returns the description of this token.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl<T> Token for InjectionToken<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Value = T;

    fn key(&self) -> TokenKey {
        TokenKey(Repr::Opaque {
            id: self.id,
            description: Arc::clone(&self.description),
        })
    }
}

impl<T> Clone for InjectionToken<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            description: Arc::clone(&self.description),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for InjectionToken<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for InjectionToken<T> {}

impl<T> fmt::Debug for InjectionToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionToken")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish()
    }
}

impl<T> fmt::Display for InjectionToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InjectionToken({})", self.description)
    }
}

/// The class token of type `T`: the type itself is the key.
pub struct Class<T>(PhantomData<fn() -> T>);

impl<T> Class<T> {
    /// Returns the class token of `T`.
    pub const fn of() -> Self {
        Self(PhantomData)
    }
}

impl<T> Token for Class<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Value = T;

    #[inline]
    fn key(&self) -> TokenKey {
        TokenKey::of_class::<T>()
    }
}

impl<T> Clone for Class<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Class<T> {}

impl<T> Default for Class<T> {
    fn default() -> Self {
        Self::of()
    }
}

impl<T> fmt::Debug for Class<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Class").field(&type_name::<T>()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[derive(Clone)]
    struct Logger;

    #[derive(Clone)]
    struct Database;

    #[test]
    fn test_class_key_is_type_identity() {
        assert_eq!(Class::<Logger>::of().key(), Class::<Logger>::of().key());
        assert_ne!(Class::<Logger>::of().key(), Class::<Database>::of().key());
        assert_eq!(Class::<Logger>::of().key(), TokenKey::of_class::<Logger>());
    }

    #[test]
    fn test_injection_token_identity() {
        let a = InjectionToken::<u32>::new("PORT");
        let b = InjectionToken::<u32>::new("PORT");
        assert_ne!(a, b);
        assert_ne!(a.key(), b.key());
        assert_eq!(a, a.clone());
        assert_eq!(a.key(), a.clone().key());
    }

    #[test]
    fn test_class_and_opaque_never_equal() {
        let opaque = InjectionToken::<Logger>::new("Logger");
        assert_ne!(opaque.key(), Class::<Logger>::of().key());
    }

    #[test]
    fn test_keys_hash_by_identity() {
        let token = InjectionToken::<u32>::new("PORT");
        let mut set = HashSet::new();
        set.insert(token.key());
        set.insert(token.clone().key());
        set.insert(InjectionToken::<u32>::new("PORT").key());
        set.insert(Class::<Logger>::of().key());
        set.insert(TokenKey::of_class::<Logger>());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Class::<Logger>::of().key().to_string(), "class Logger");
        assert_eq!(
            InjectionToken::<bool>::new("VERBOSE").key().to_string(),
            "InjectionToken(VERBOSE)"
        );
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("app::services::Logger"), "Logger");
        assert_eq!(short_type_name("Logger"), "Logger");
        assert_eq!(short_type_name("alloc::sync::Arc<app::Db>"), "Arc<app::Db>");
        assert_eq!(short_type_name("u32"), "u32");
    }
}
