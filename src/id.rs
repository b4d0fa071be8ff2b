use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::marker::PhantomData;

/// Store-assigned primary key with compile-time type safety over the
/// `SERIAL` column it was read from.
///
/// Never constructed by callers for new rows; the store hands these out on
/// insert. Caller-assigned external identifiers stay plain `i32`s.
pub struct ID<T> {
    inner: i32,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> i32 {
        self.inner
    }
}

/// Unique identifier trait for stored rows.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

impl<T> From<ID<T>> for i32 {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<i32> for ID<T> {
    fn from(inner: i32) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    struct Marker;
    #[test]
    fn ids_compare_by_key() {
        let a = ID::<Marker>::from(1);
        let b = ID::<Marker>::from(2);
        assert!(a < b);
        assert_eq!(a, ID::from(1));
        assert_eq!(i32::from(b), 2);
    }
    #[test]
    fn ids_display_as_key() {
        let id = ID::<Marker>::from(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{:?}", id), "ID(42)");
    }
}
