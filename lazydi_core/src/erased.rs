//! Resolved values with erased type information.

use std::any::{Any, type_name};

/// Clones a value behind a trait object into a [`Box`].
///
/// This trait is used to work around [`Sized`] bound on [`Clone`].
trait CloneBoxed: Any + Send + Sync {
    fn clone_boxed(&self) -> Box<dyn CloneBoxed>;
}

impl<T> CloneBoxed for T
where
    T: Any + Clone + Send + Sync,
{
    fn clone_boxed(&self) -> Box<dyn CloneBoxed> {
        Box::new(self.clone())
    }
}

/// [`Erased`] holds a resolved value of an arbitrary type, as long as it
/// implements [`Clone`], [`Send`], and [`Sync`] and is `'static`.
///
/// Value entries of the registry are stored as [`Erased`]; every resolution of such an entry
/// hands out a clone of the stored value. Services that should be shared rather than copied
/// are usually wrapped in an [`Arc`](std::sync::Arc).
pub struct Erased {
    value: Box<dyn CloneBoxed>,
    type_name: &'static str,
}

impl Erased {
    /// Wraps `value`.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the name of the type of the wrapped value.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the wrapped value is of type `T`.
    pub fn is<T>(&self) -> bool
    where
        T: 'static,
    {
        (&*self.value as &dyn Any).is::<T>()
    }

    /// Tries to downcast `self` into type `T`.
    ///
    /// # Errors
    ///
    /// If the underlying value is not of type `T`, this method will return
    /// itself as error.
    pub fn downcast<T>(self) -> Result<T, Self>
    where
        T: Clone + Send + Sync + 'static,
    {
        if !self.is::<T>() {
            return Err(self);
        }

        #[expect(clippy::missing_panics_doc, reason = "already checked")]
        let concrete = (self.value as Box<dyn Any>)
            .downcast::<T>()
            .expect("the concrete type of this box should be `T` as it was checked before downcasting");
        Ok(*concrete)
    }

    /// Returns a reference to the wrapped value if it is of type `T`.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: 'static,
    {
        (&*self.value as &dyn Any).downcast_ref()
    }
}

impl Clone for Erased {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone_boxed(),
            type_name: self.type_name,
        }
    }
}

impl std::fmt::Debug for Erased {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Erased")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Erased;

    #[allow(dead_code)]
    fn test_implements_send_and_sync() -> impl Send + Sync {
        Erased::new("Hello".to_string())
    }

    #[test]
    fn test_downcast() {
        let erased = Erased::new("Hello".to_string());
        assert!(erased.is::<String>());
        let got = erased.downcast::<String>().unwrap();
        assert_eq!(got, "Hello");
    }

    #[test]
    fn test_downcast_err_returns_self() {
        let erased = Erased::new("Hello".to_string());
        let err = erased.downcast::<i32>().unwrap_err();

        let got = err.downcast::<String>().unwrap();
        assert_eq!(got, "Hello");
    }

    #[test]
    fn test_downcast_ref() {
        let erased = Erased::new(42_u16);
        assert_eq!(erased.downcast_ref::<u16>(), Some(&42));
        assert!(erased.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn test_type_name() {
        let erased = Erased::new(false);
        assert_eq!(erased.type_name(), "bool");
    }

    #[test]
    fn test_clone_shares_arc() {
        let a = Arc::new(100);
        let erased = Erased::new(Arc::clone(&a));
        assert_eq!(Arc::strong_count(&a), 2);

        let cloned = erased.clone();
        assert_eq!(Arc::strong_count(&a), 3);
        assert!(Arc::ptr_eq(&cloned.downcast::<Arc<i32>>().unwrap(), &a));

        drop(erased);
        assert_eq!(Arc::strong_count(&a), 1);
    }
}
