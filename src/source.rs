use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::{Cursor, Error, Result};

/// A cursor over a borrowed slice.
///
/// Holds an index starting at `0`: `has_next` is `index < len`, `next` yields
/// the element at `index` and bumps it.
#[derive(Debug, Clone)]
pub struct Seq<'a, T> {
    slice: &'a [T],
    index: usize
}

impl<'a, T> Seq<'a, T> {
    /// Start a cursor at the beginning of `slice`.
    #[inline]
    pub const fn new(slice: &'a [T]) -> Self {
        Self { slice, index: 0 }
    }

    /// How many elements have been yielded so far.
    #[inline]
    pub const fn position(&self) -> usize { self.index }
}

impl<'a, T> Cursor for Seq<'a, T> {
    type Item = &'a T;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.index < self.slice.len()
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        let elem = self.slice.get(self.index).ok_or(Error::ExhaustedIterator)?;
        self.index += 1;
        Ok(elem)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slice.len() - self.index;
        (remaining, Some(remaining))
    }
}

/// A cursor over an owned sequence, or anything else that knows its exact
/// remaining length (owned maps included).
#[derive(Debug, Clone)]
pub struct Exact<I> {
    iter: I
}

impl<I: ExactSizeIterator> Exact<I> {
    /// Take ownership of everything `iter` produces.
    #[inline]
    pub fn new<S: IntoIterator<IntoIter = I>>(src: S) -> Self {
        Self { iter: src.into_iter() }
    }
}

impl<I: ExactSizeIterator> Cursor for Exact<I> {
    type Item = I::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.iter.len() != 0
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        self.iter.next().ok_or(Error::ExhaustedIterator)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.iter.len();
        (remaining, Some(remaining))
    }
}

/// A key/value pair yielded when walking a mapping.
///
/// Serializes as `{"key": .., "value": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry<K, V> {
    /// The member's key.
    pub key: K,
    /// The member's value.
    pub value: V
}

impl<K, V> Entry<K, V> {
    /// Pair `key` with `value`.
    #[inline]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Split into a `(key, value)` tuple.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<Entry<K, V>> for (K, V) {
    #[inline]
    fn from(entry: Entry<K, V>) -> Self {
        entry.into_pair()
    }
}

impl<K: Into<String>, V: Into<Value>> From<Entry<K, V>> for Value {
    fn from(entry: Entry<K, V>) -> Self {
        let mut object = serde_json::Map::with_capacity(2);
        object.insert("key".into(), Value::String(entry.key.into()));
        object.insert("value".into(), entry.value.into());
        Value::Object(object)
    }
}

/// A collection whose members can be enumerated by key and looked up by key.
pub trait Mapping {
    /// Key type.
    type Key;
    /// Value type.
    type Value;

    /// Every key, in the mapping's enumeration order.
    fn own_keys(&self) -> Vec<&Self::Key>;

    /// The value stored under `key`, which must come from [`own_keys`].
    ///
    /// [`own_keys`]: Mapping::own_keys
    fn lookup(&self, key: &Self::Key) -> &Self::Value;
}

impl<K: Ord, V> Mapping for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn own_keys(&self) -> Vec<&K> { self.keys().collect() }

    #[inline]
    fn lookup(&self, key: &K) -> &V { &self[key] }
}

impl<K: Hash + Eq, V, S: BuildHasher> Mapping for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    #[inline]
    fn own_keys(&self) -> Vec<&K> { self.keys().collect() }

    #[inline]
    fn lookup(&self, key: &K) -> &V { &self[key] }
}

#[cfg(feature = "indexmap")]
impl<K: Hash + Eq, V, S: BuildHasher> Mapping for indexmap::IndexMap<K, V, S> {
    type Key = K;
    type Value = V;

    #[inline]
    fn own_keys(&self) -> Vec<&K> { self.keys().collect() }

    #[inline]
    fn lookup(&self, key: &K) -> &V { &self[key] }
}

impl Mapping for serde_json::Map<String, Value> {
    type Key = String;
    type Value = Value;

    #[inline]
    fn own_keys(&self) -> Vec<&String> { self.keys().collect() }

    #[inline]
    fn lookup(&self, key: &String) -> &Value { &self[key.as_str()] }
}

/// Cursor over the keys of a [`Mapping`], see [`keys`].
pub type Keys<'a, M> = Exact<std::vec::IntoIter<&'a <M as Mapping>::Key>>;

/// Collect the keys of `mapping`, in enumeration order, into a sequence cursor.
///
/// ```
/// # use lazy_cursor::{keys, to_vec};
/// # use indexmap::IndexMap;
/// let mapping = IndexMap::from([("foo", "bar"), ("baz", "xyzzy")]);
///
/// assert_eq!(to_vec(keys(&mapping)), Ok(vec![&"foo", &"baz"]));
/// ```
#[inline]
pub fn keys<M: Mapping>(mapping: &M) -> Keys<'_, M> {
    Exact::new(mapping.own_keys())
}

/// Cursor over the values of a [`Mapping`], see [`values`].
pub struct Values<'a, M: Mapping> {
    keys: Keys<'a, M>,
    mapping: &'a M
}

/// The keys of `mapping` mapped through a lookup into it.
///
/// The key list is fixed at construction, every value is looked up as it is
/// yielded.
///
/// ```
/// # use lazy_cursor::{values, to_vec};
/// # use indexmap::IndexMap;
/// let mapping = IndexMap::from([("foo", "bar"), ("baz", "xyzzy")]);
///
/// assert_eq!(to_vec(values(&mapping)), Ok(vec![&"bar", &"xyzzy"]));
/// ```
#[inline]
pub fn values<M: Mapping>(mapping: &M) -> Values<'_, M> {
    Values { keys: keys(mapping), mapping }
}

impl<M: Mapping> Clone for Values<'_, M> {
    fn clone(&self) -> Self {
        Self { keys: self.keys.clone(), mapping: self.mapping }
    }
}

impl<'a, M: Mapping> Cursor for Values<'a, M> {
    type Item = &'a M::Value;

    #[inline]
    fn has_next(&mut self) -> bool { self.keys.has_next() }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        let key = self.keys.next()?;
        Ok(self.mapping.lookup(key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { self.keys.size_hint() }
}

/// Cursor over the members of a [`Mapping`] as [`Entry`] values, see [`entries`].
pub struct Entries<'a, M: Mapping> {
    keys: Keys<'a, M>,
    mapping: &'a M
}

/// The keys of `mapping` mapped into `Entry { key, value }` pairs.
#[inline]
pub fn entries<M: Mapping>(mapping: &M) -> Entries<'_, M> {
    Entries { keys: keys(mapping), mapping }
}

impl<M: Mapping> Clone for Entries<'_, M> {
    fn clone(&self) -> Self {
        Self { keys: self.keys.clone(), mapping: self.mapping }
    }
}

impl<'a, M: Mapping> Cursor for Entries<'a, M> {
    type Item = Entry<&'a M::Key, &'a M::Value>;

    #[inline]
    fn has_next(&mut self) -> bool { self.keys.has_next() }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        let key = self.keys.next()?;
        Ok(Entry::new(key, self.mapping.lookup(key)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { self.keys.size_hint() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_vec;
    use proptest::prelude::*;

    #[test]
    fn seq_tracks_position() {
        let src = ["a", "b"];
        let mut cursor = Seq::new(&src);

        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.size_hint(), (2, Some(2)));
        let _ = cursor.next();
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.size_hint(), (1, Some(1)));
    }

    #[test]
    fn json_map_keeps_insertion_order() {
        let object = serde_json::json!({ "foo": "bar", "baz": "xyzzy" });
        let Value::Object(members) = object else { unreachable!() };

        assert_eq!(
            to_vec(keys(&members)).unwrap(),
            [&String::from("foo"), &String::from("baz")]
        );
        assert_eq!(to_vec(values(&members)).unwrap(), [&Value::from("bar"), &Value::from("xyzzy")]);
    }

    #[test]
    fn btree_entries_follow_key_order() {
        let mapping = BTreeMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);

        assert_eq!(
            to_vec(entries(&mapping)).unwrap(),
            [Entry::new(&1, &'a'), Entry::new(&2, &'b'), Entry::new(&3, &'c')]
        );
    }

    #[test]
    fn entry_serializes_as_key_value_object() {
        let entry = Entry::new("foo", 7);

        assert_eq!(
            serde_json::to_value(entry).unwrap(),
            serde_json::json!({ "key": "foo", "value": 7 })
        );
        assert_eq!(Value::from(entry), serde_json::json!({ "key": "foo", "value": 7 }));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2_000))]

        #[test]
        fn seq_matches_slice(collection in any::<Vec<u8>>()) {
            let yielded: Vec<&u8> = to_vec(Seq::new(&collection)).unwrap();
            prop_assert_eq!(yielded, collection.iter().collect::<Vec<_>>());
        }

        #[test]
        fn values_pair_up_with_keys(mapping in any::<HashMap<u8, u16>>()) {
            let ks = to_vec(keys(&mapping)).unwrap();
            let vs = to_vec(values(&mapping)).unwrap();

            prop_assert_eq!(ks.len(), mapping.len());
            for (key, value) in ks.into_iter().zip(vs) {
                prop_assert_eq!(mapping.get(key), Some(value));
            }
        }
    }
}
