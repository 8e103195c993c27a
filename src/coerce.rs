use core::hash::{BuildHasher, Hash};
use std::collections::{btree_map, hash_map, BTreeMap, HashMap};
#[cfg(feature = "indexmap")]
use indexmap::IndexMap;
use serde_json::Value;
use crate::{
    combinator::Map,
    source::{entries, Entries, Entry, Exact, Seq},
    Cursor, Error, Result
};

/// Conversion of a cursor, an ordered sequence, or a mapping into a
/// [`Cursor`].
///
/// Every coercing operation of this crate ([`each`], [`map`], [`filter`],
/// [`reduce`], [`to_vec`], [`to_map`]) goes through this trait, so they accept
/// any of these interchangeably:
///
/// * a [`Cursor`], returned as is.
/// * a sequence (`Vec<T>`, `[T; N]`, `&[T]`, `&Vec<T>`), walked in order.
/// * a mapping (`BTreeMap`, `HashMap`, `IndexMap`, `serde_json::Map`), walked
///   as [`Entry`] values in the mapping's enumeration order.
/// * a [`serde_json::Value`] array or object. Other JSON values are rejected
///   with [`Error::UnsupportedInput`].
///
/// [`each`]: crate::each
/// [`map`]: crate::map
/// [`filter`]: crate::filter
/// [`reduce`]: crate::reduce
/// [`to_vec`]: crate::to_vec
/// [`to_map`]: crate::to_map
pub trait IntoCursor {
    /// The type of the elements produced.
    type Item;
    /// The cursor produced.
    type Cursor: Cursor<Item = Self::Item>;

    /// Perform the conversion.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedInput`] if the input cannot be walked.
    fn into_cursor(self) -> Result<Self::Cursor>;
}

/// Normalize `input` into a [`Cursor`], see [`IntoCursor`].
///
/// A cursor comes back untouched:
///
/// ```
/// # use lazy_cursor::{to_cursor, Cursor};
/// let mut cursor = to_cursor(vec![1, 2, 3])?;
/// let _ = cursor.next()?;
///
/// let mut again = to_cursor(cursor)?;
/// assert_eq!(again.next()?, 2);
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
#[inline]
pub fn to_cursor<I: IntoCursor>(input: I) -> Result<I::Cursor> {
    input.into_cursor()
}

impl<C: Cursor> IntoCursor for C {
    type Item = C::Item;
    type Cursor = C;

    #[inline]
    fn into_cursor(self) -> Result<C> { Ok(self) }
}

impl<T> IntoCursor for Vec<T> {
    type Item = T;
    type Cursor = Exact<std::vec::IntoIter<T>>;

    #[inline]
    fn into_cursor(self) -> Result<Self::Cursor> {
        trace!(kind = "sequence", len = self.len(), "coerced owned sequence");
        Ok(Exact::new(self))
    }
}

impl<T, const N: usize> IntoCursor for [T; N] {
    type Item = T;
    type Cursor = Exact<core::array::IntoIter<T, N>>;

    #[inline]
    fn into_cursor(self) -> Result<Self::Cursor> {
        trace!(kind = "sequence", len = N, "coerced array");
        Ok(Exact::new(self))
    }
}

impl<'a, T> IntoCursor for &'a [T] {
    type Item = &'a T;
    type Cursor = Seq<'a, T>;

    #[inline]
    fn into_cursor(self) -> Result<Self::Cursor> {
        trace!(kind = "sequence", len = self.len(), "coerced borrowed sequence");
        Ok(Seq::new(self))
    }
}

impl<'a, T> IntoCursor for &'a Vec<T> {
    type Item = &'a T;
    type Cursor = Seq<'a, T>;

    #[inline]
    fn into_cursor(self) -> Result<Self::Cursor> {
        self.as_slice().into_cursor()
    }
}

/// Cursor over an owned mapping, yielding its members as [`Entry`] values.
pub type OwnedEntries<I, K, V> = Map<Exact<I>, fn((K, V)) -> Entry<K, V>>;

#[inline]
fn owned_entries<I, K, V>(members: I) -> OwnedEntries<I, K, V>
    where I: ExactSizeIterator<Item = (K, V)>
{
    trace!(kind = "mapping", len = members.len(), "coerced owned mapping");
    Exact::new(members).map(Entry::from as fn((K, V)) -> Entry<K, V>)
}

macro_rules! mapping_into_cursor {
    (
        $map:ident<$k:ident, $v:ident $(, $s:ident)?> where [$($bounds:tt)*],
        $into_iter:ty
    ) => {
        impl<$k, $v $(, $s)?> IntoCursor for $map<$k, $v $(, $s)?> where $($bounds)* {
            type Item = Entry<$k, $v>;
            type Cursor = OwnedEntries<$into_iter, $k, $v>;

            #[inline]
            fn into_cursor(self) -> Result<Self::Cursor> {
                Ok(owned_entries(self.into_iter()))
            }
        }

        impl<'a, $k, $v $(, $s)?> IntoCursor for &'a $map<$k, $v $(, $s)?> where $($bounds)* {
            type Item = Entry<&'a $k, &'a $v>;
            type Cursor = Entries<'a, $map<$k, $v $(, $s)?>>;

            #[inline]
            fn into_cursor(self) -> Result<Self::Cursor> {
                trace!(kind = "mapping", len = self.len(), "coerced borrowed mapping");
                Ok(entries(self))
            }
        }
    };
}

mapping_into_cursor!(BTreeMap<K, V> where [K: Ord], btree_map::IntoIter<K, V>);
mapping_into_cursor!(HashMap<K, V, S> where [K: Hash + Eq, S: BuildHasher], hash_map::IntoIter<K, V>);

#[cfg(feature = "indexmap")]
mapping_into_cursor!(IndexMap<K, V, S> where [K: Hash + Eq, S: BuildHasher], indexmap::map::IntoIter<K, V>);

impl IntoCursor for serde_json::Map<String, Value> {
    type Item = Entry<String, Value>;
    type Cursor = OwnedEntries<serde_json::map::IntoIter, String, Value>;

    #[inline]
    fn into_cursor(self) -> Result<Self::Cursor> {
        Ok(owned_entries(self.into_iter()))
    }
}

impl<'a> IntoCursor for &'a serde_json::Map<String, Value> {
    type Item = Entry<&'a String, &'a Value>;
    type Cursor = Entries<'a, serde_json::Map<String, Value>>;

    #[inline]
    fn into_cursor(self) -> Result<Self::Cursor> {
        trace!(kind = "mapping", len = self.len(), "coerced borrowed json object");
        Ok(entries(self))
    }
}

/// Cursor over a dynamic [`serde_json::Value`], see [`IntoCursor`].
///
/// Arrays yield their elements. Objects yield one `{"key": .., "value": ..}`
/// object per member, in insertion order.
///
/// ```
/// # use lazy_cursor::{to_vec};
/// # use serde_json::json;
/// let members = to_vec(json!({ "foo": "bar", "baz": "xyzzy" }))?;
///
/// assert_eq!(members, [
///     json!({ "key": "foo", "value": "bar" }),
///     json!({ "key": "baz", "value": "xyzzy" }),
/// ]);
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
pub enum Json {
    /// Elements of a JSON array.
    Array(Exact<std::vec::IntoIter<Value>>),
    /// Members of a JSON object as entry objects.
    Object(Map<Exact<serde_json::map::IntoIter>, fn((String, Value)) -> Value>)
}

#[inline]
fn entry_object(member: (String, Value)) -> Value {
    Value::from(Entry::from(member))
}

impl Cursor for Json {
    type Item = Value;

    #[inline]
    fn has_next(&mut self) -> bool {
        match self {
            Self::Array(elems)    => elems.has_next(),
            Self::Object(members) => members.has_next()
        }
    }

    #[inline]
    fn next(&mut self) -> Result<Value> {
        match self {
            Self::Array(elems)    => elems.next(),
            Self::Object(members) => members.next()
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Array(elems)    => elems.size_hint(),
            Self::Object(members) => members.size_hint()
        }
    }
}

impl IntoCursor for Value {
    type Item = Value;
    type Cursor = Json;

    fn into_cursor(self) -> Result<Json> {
        match self {
            Value::Array(elems) => {
                trace!(kind = "json array", len = elems.len(), "coerced json value");
                Ok(Json::Array(Exact::new(elems)))
            },
            Value::Object(members) => {
                trace!(kind = "json object", len = members.len(), "coerced json value");
                Ok(Json::Object(
                    Exact::new(members).map(entry_object as fn((String, Value)) -> Value)
                ))
            },
            other => Err(Error::UnsupportedInput(other.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{to_map, to_vec, PeekCursor};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn sequence_yields_in_order() {
        let mut cursor = to_cursor(vec![1, 2, 3]).unwrap();

        assert_eq!(cursor.next(), Ok(1));
        assert_eq!(cursor.next(), Ok(2));
        assert_eq!(cursor.next(), Ok(3));
        assert_eq!(cursor.next(), Err(Error::ExhaustedIterator));
    }

    #[test]
    #[cfg(feature = "indexmap")]
    fn mapping_yields_entries() {
        let mapping = IndexMap::from([("foo", "bar"), ("baz", "xyzzy")]);
        let mut cursor = to_cursor(&mapping).unwrap();

        assert_eq!(cursor.next(), Ok(Entry::new(&"foo", &"bar")));
        assert_eq!(cursor.next(), Ok(Entry::new(&"baz", &"xyzzy")));
        assert!(!cursor.has_next());

        let owned: Vec<_> = to_vec(mapping).unwrap();
        assert_eq!(owned, [Entry::new("foo", "bar"), Entry::new("baz", "xyzzy")]);
    }

    #[test]
    fn cursor_passes_through() {
        let src = [1, 2, 3];
        let mut cursor = crate::peekable(Seq::new(&src));
        let _ = cursor.peek();

        let same: crate::Peekable<Seq<'_, i32>> = to_cursor(cursor).unwrap();
        assert!(same.is_buffered());
    }

    #[test]
    fn scalar_json_is_unsupported() {
        for scalar in [json!(null), json!(true), json!(42), json!("text")] {
            let rendered = scalar.to_string();

            assert_eq!(
                to_cursor(scalar).err(),
                Some(Error::UnsupportedInput(rendered))
            );
        }

        assert_eq!(
            Error::UnsupportedInput("42".into()).to_string(),
            "cannot convert argument to iterator: 42"
        );
    }

    #[test]
    fn json_object_members_keep_insertion_order() {
        let mut cursor = to_cursor(json!({ "zeta": 1, "alpha": 2 })).unwrap();

        assert_eq!(cursor.size_hint(), (2, Some(2)));
        assert_eq!(cursor.next(), Ok(json!({ "key": "zeta", "value": 1 })));
        assert_eq!(cursor.next(), Ok(json!({ "key": "alpha", "value": 2 })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2_000))]

        #[test]
        fn sequence_round_trip(collection in any::<Vec<u16>>()) {
            prop_assert_eq!(to_vec(collection.clone()).unwrap(), collection);
        }

        #[test]
        fn btree_round_trip(mapping in any::<BTreeMap<u8, String>>()) {
            let owned: BTreeMap<u8, String> = to_map(mapping.clone()).unwrap();
            prop_assert_eq!(&owned, &mapping);

            let borrowed: BTreeMap<&u8, &String> = to_map(&mapping).unwrap();
            prop_assert!(borrowed.into_iter().eq(mapping.iter()));
        }

        #[test]
        fn hash_round_trip(mapping in any::<HashMap<u16, u8>>()) {
            let owned: HashMap<u16, u8> = to_map(mapping.clone()).unwrap();
            prop_assert_eq!(owned, mapping);
        }

        #[test]
        fn json_object_round_trip(mapping in any::<BTreeMap<String, i64>>()) {
            let object: serde_json::Map<String, Value> = mapping
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect();

            let through_value: serde_json::Map<String, Value> =
                to_map(Value::Object(object.clone())).unwrap();
            prop_assert_eq!(&through_value, &object);

            let through_map: serde_json::Map<String, Value> = to_map(object.clone()).unwrap();
            prop_assert_eq!(through_map, object);
        }
    }
}
