use serde_json::Value;
use crate::{
    combinator::{Filter, Map},
    peekable::IntoPeekable,
    source::Entry,
    Cursor, Error, IntoCursor, Result
};

/// Call `f` on every element of `input`, in order.
///
/// # Errors
///
/// Whatever coercing `input` fails with.
pub fn each<I, F>(input: I, mut f: F) -> Result<()>
    where
        I: IntoCursor,
        F: FnMut(I::Item)
{
    let mut cursor = input.into_cursor()?;
    while cursor.has_next() {
        f(cursor.next()?);
    }

    trace!("each finished");
    Ok(())
}

/// Lazily apply `f` to every element of `input`.
///
/// Nothing runs until the returned cursor is pulled from, see [`Map`].
///
/// ```
/// # use lazy_cursor::{map, to_vec};
/// assert_eq!(to_vec(map(vec![1, 2, 3], |n| n * 2)?)?, [2, 4, 6]);
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
///
/// # Errors
///
/// Whatever coercing `input` fails with.
#[inline]
pub fn map<I, F, U>(input: I, f: F) -> Result<Map<I::Cursor, F>>
    where
        I: IntoCursor,
        F: FnMut(I::Item) -> U
{
    Ok(input.into_cursor()?.map(f))
}

/// Lazily keep the elements of `input` accepted by `predicate`.
///
/// Nothing runs until the returned cursor is asked for an element, see
/// [`Filter`].
///
/// ```
/// # use lazy_cursor::{filter, to_vec};
/// let is_even = |n: &i32| n % 2 == 0;
/// assert_eq!(to_vec(filter(vec![1, 2, 3, 4, 5, 6], is_even)?)?, [2, 4, 6]);
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
///
/// # Errors
///
/// Whatever coercing `input` fails with.
#[inline]
pub fn filter<I, F>(input: I, predicate: F) -> Result<Filter<<I::Cursor as IntoPeekable>::Peekable, F>>
    where
        I: IntoCursor,
        I::Cursor: IntoPeekable,
        F: FnMut(&I::Item) -> bool
{
    Ok(input.into_cursor()?.filter(predicate))
}

/// Fold `input` from the left with `f`.
///
/// With `seed` absent the first element is the starting accumulator and the
/// rest are folded into it. With `seed` present every element is folded into
/// it, whatever its value, so `Some(0)` or `Some(None)` are honored.
///
/// ```
/// # use lazy_cursor::reduce;
/// let add = |acc: i32, n: i32| acc + n;
///
/// assert_eq!(reduce(vec![1, 2, 3], add, None)?, 6);
/// assert_eq!(reduce(vec![1, 2, 3], add, Some(4))?, 10);
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
///
/// # Errors
///
/// [`Error::ExhaustedIterator`] if `input` is empty and no seed was given,
/// otherwise whatever coercing `input` fails with.
pub fn reduce<I, F>(input: I, f: F, seed: Option<I::Item>) -> Result<I::Item>
    where
        I: IntoCursor,
        F: FnMut(I::Item, I::Item) -> I::Item
{
    let mut cursor = input.into_cursor()?;
    let seed = match seed {
        Some(seed) => seed,
        None => cursor.next()?
    };

    fold_cursor(cursor, seed, f)
}

/// Fold every element of `input` into `seed` with `f`, from the left.
///
/// ```
/// # use lazy_cursor::fold;
/// let joined = fold(vec!["a", "b", "c"], String::new(), |mut acc, s| { acc.push_str(s); acc })?;
/// assert_eq!(joined, "abc");
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
///
/// # Errors
///
/// Whatever coercing `input` fails with.
#[inline]
pub fn fold<I, A, F>(input: I, seed: A, f: F) -> Result<A>
    where
        I: IntoCursor,
        F: FnMut(A, I::Item) -> A
{
    fold_cursor(input.into_cursor()?, seed, f)
}

fn fold_cursor<C, A, F>(mut cursor: C, seed: A, mut f: F) -> Result<A>
    where
        C: Cursor,
        F: FnMut(A, C::Item) -> A
{
    let mut acc = seed;
    while cursor.has_next() {
        acc = f(acc, cursor.next()?);
    }
    Ok(acc)
}

/// Drain `input` into a `Vec`, keeping order and duplicates.
///
/// # Errors
///
/// Whatever coercing `input` fails with.
pub fn to_vec<I: IntoCursor>(input: I) -> Result<Vec<I::Item>> {
    let mut cursor = input.into_cursor()?;
    let mut out = Vec::with_capacity(cursor.size_hint().0);

    while cursor.has_next() {
        out.push(cursor.next()?);
    }

    trace!(drained = out.len(), "to_vec finished");
    Ok(out)
}

/// Something that can be split into a key and a value.
pub trait IntoEntry {
    /// The key type.
    type Key;
    /// The value type.
    type Value;

    /// Perform the conversion.
    ///
    /// # Errors
    ///
    /// [`Error::NotAnEntry`] if `self` does not describe a key/value pair.
    fn into_entry(self) -> Result<Entry<Self::Key, Self::Value>>;
}

impl<K, V> IntoEntry for Entry<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn into_entry(self) -> Result<Self> { Ok(self) }
}

impl<K, V> IntoEntry for (K, V) {
    type Key = K;
    type Value = V;

    #[inline]
    fn into_entry(self) -> Result<Entry<K, V>> { Ok(Entry::from(self)) }
}

impl IntoEntry for Value {
    type Key = String;
    type Value = Value;

    /// Accepts `{"key": <string>, "value": <any>}` objects, the shape JSON
    /// object members are yielded in.
    fn into_entry(self) -> Result<Entry<String, Value>> {
        serde_json::from_value(self).map_err(|err| Error::NotAnEntry(err.to_string()))
    }
}

/// Drain an entry-producing `input` into a mapping.
///
/// Later entries overwrite earlier ones with the same key.
///
/// ```
/// # use lazy_cursor::{to_map, Entry};
/// # use std::collections::BTreeMap;
/// let entries = vec![Entry::new("a", 1), Entry::new("b", 2), Entry::new("a", 3)];
/// let mapping: BTreeMap<_, _> = to_map(entries)?;
///
/// assert_eq!(mapping, BTreeMap::from([("a", 3), ("b", 2)]));
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
///
/// # Errors
///
/// [`Error::NotAnEntry`] if an element is not an entry, otherwise whatever
/// coercing `input` fails with.
pub fn to_map<I, M>(input: I) -> Result<M>
    where
        I: IntoCursor,
        I::Item: IntoEntry,
        M: Default + Extend<(<I::Item as IntoEntry>::Key, <I::Item as IntoEntry>::Value)>
{
    let mut cursor = input.into_cursor()?;
    let mut out = M::default();

    while cursor.has_next() {
        let entry = cursor.next()?.into_entry()?;
        out.extend(Some(entry.into_pair()));
    }

    Ok(out)
}

/// A JSON element a named field can be pulled out of, see [`project`].
///
/// Owned values give the field up, borrowed ones clone it.
pub trait Field {
    /// The field named `name`, or [`Value::Null`] if `self` is not an object
    /// or has no such field.
    fn field(self, name: &str) -> Value;
}

impl Field for Value {
    #[inline]
    fn field(mut self, name: &str) -> Value {
        self.get_mut(name).map(Value::take).unwrap_or_default()
    }
}

impl Field for &Value {
    #[inline]
    fn field(self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or_default()
    }
}

/// Lazily pull the field named `field` out of every JSON object in `input`.
///
/// Elements that are not objects, or lack the field, project to
/// [`Value::Null`].
///
/// ```
/// # use lazy_cursor::{project, to_vec};
/// # use serde_json::json;
/// let points = json!([{ "x": 1, "y": 10 }, { "x": 2, "y": 20 }]);
///
/// assert_eq!(to_vec(project(points.clone(), "x")?)?, [json!(1), json!(2)]);
/// assert_eq!(to_vec(project(points, "y")?)?, [json!(10), json!(20)]);
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
///
/// Borrowed elements work too, leaving the source untouched:
///
/// ```
/// # use lazy_cursor::{project, to_vec};
/// # use serde_json::json;
/// let rows = vec![json!({ "id": 7 }), json!({ "id": 8 })];
///
/// assert_eq!(to_vec(project(&rows, "id")?)?, [json!(7), json!(8)]);
/// assert_eq!(rows[0], json!({ "id": 7 }));
/// # Ok::<(), lazy_cursor::Error>(())
/// ```
///
/// # Errors
///
/// Whatever coercing `input` fails with.
pub fn project<I>(input: I, field: impl Into<String>) -> Result<Map<I::Cursor, impl FnMut(I::Item) -> Value>>
    where
        I: IntoCursor,
        I::Item: Field
{
    let field = field.into();
    map(input, move |elem: I::Item| elem.field(field.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_std, Exact, Seq};
    use core::cell::Cell;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn each_visits_in_order() {
        let mut seen = Vec::new();
        each(vec!['a', 'b', 'c'], |c| seen.push(c)).unwrap();

        assert_eq!(seen, ['a', 'b', 'c']);
    }

    #[test]
    fn each_propagates_unsupported_input() {
        let called = Cell::new(false);

        assert_eq!(
            each(json!(12), |_| called.set(true)),
            Err(Error::UnsupportedInput("12".into()))
        );
        assert!(!called.get());
    }

    #[test]
    fn reduce_without_seed_on_empty() {
        assert_eq!(
            reduce(Vec::<i32>::new(), |a, b| a + b, None),
            Err(Error::ExhaustedIterator)
        );
        assert_eq!(reduce(Vec::<i32>::new(), |a, b| a + b, Some(7)), Ok(7));
    }

    #[test]
    fn reduce_honors_falsy_seeds() {
        assert_eq!(reduce(vec![1, 2, 3], |a, b| a * b, Some(0)), Ok(0));
        assert_eq!(reduce(vec![String::from("x")], |a, b| a + &b, Some(String::new())), Ok("x".into()));

        let firsts = reduce(
            vec![Some(1), None, Some(3)],
            |acc, elem| acc.or(elem),
            Some(None)
        );
        assert_eq!(firsts, Ok(Some(1)));
    }

    #[test]
    fn reduce_folds_left_to_right() {
        let order = reduce(vec!["a", "b", "c"].into_iter().map(String::from).collect::<Vec<_>>(), |a, b| a + &b, None);
        assert_eq!(order, Ok(String::from("abc")));
    }

    #[test]
    fn to_map_last_write_wins() {
        let mapping: BTreeMap<&str, i32> = to_map(vec![("k", 1), ("k", 2)]).unwrap();
        assert_eq!(mapping, BTreeMap::from([("k", 2)]));
    }

    #[test]
    fn to_map_rejects_non_entries() {
        let res: Result<serde_json::Map<String, Value>> = to_map(json!([1, 2]));
        assert!(matches!(res, Err(Error::NotAnEntry(_))));

        let res: Result<serde_json::Map<String, Value>> = to_map(json!([{ "key": 1, "value": 2 }]));
        assert!(matches!(res, Err(Error::NotAnEntry(_))));
    }

    #[test]
    fn project_is_lazy_and_tolerant() {
        let pulled = Cell::new(0);
        let rows = from_std(vec![json!({ "x": 1 }), json!("scalar"), json!({ "y": 2 })])
            .map(|row| { pulled.set(pulled.get() + 1); row });

        let mut xs = project(rows, "x").unwrap();
        assert_eq!(pulled.get(), 0);

        assert_eq!(xs.next(), Ok(json!(1)));
        assert_eq!(pulled.get(), 1);
        assert_eq!(to_vec(xs), Ok(vec![Value::Null, Value::Null]));
    }

    #[test]
    fn project_borrowed_elements_clones_fields() {
        let rows = vec![json!({ "x": [1, 2] }), json!(null), json!({ "x": "y" })];

        let xs = to_vec(project(Seq::new(&rows), "x").unwrap()).unwrap();
        assert_eq!(xs, [json!([1, 2]), Value::Null, json!("y")]);
        assert_eq!(rows[0], json!({ "x": [1, 2] }));

        assert_eq!(to_vec(project(&rows, "missing").unwrap()), Ok(vec![Value::Null; 3]));
    }

    #[test]
    fn coercing_functions_accept_heterogeneous_input() {
        let src = [1, 2, 3];

        assert_eq!(to_vec(&src[..]), Ok(vec![&1, &2, &3]));
        assert_eq!(to_vec(src), Ok(vec![1, 2, 3]));
        assert_eq!(to_vec(Seq::new(&src)), Ok(vec![&1, &2, &3]));
        assert_eq!(to_vec(json!([1, 2, 3])), Ok(vec![json!(1), json!(2), json!(3)]));
        assert_eq!(fold(Exact::new(vec![1, 2, 3]), 0, |a, b| a + b), Ok(6));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(5_000))]

        #[test]
        fn reduce_matches_std(collection in any::<Vec<u32>>(), seed in any::<Option<u32>>()) {
            let add = |a: u32, b: u32| a.wrapping_add(b);
            let ours = reduce(collection.clone(), add, seed);

            let std = match seed {
                Some(seed) => Some(collection.iter().copied().fold(seed, add)),
                None => collection.iter().copied().reduce(add)
            };

            match std {
                Some(expected) => prop_assert_eq!(ours, Ok(expected)),
                None => prop_assert_eq!(ours, Err(Error::ExhaustedIterator))
            }
        }

        #[test]
        fn filter_map_pipeline_matches_std(collection in any::<Vec<i16>>()) {
            let evens = filter(collection.clone(), |n| n % 2 == 0).unwrap();
            let ours = to_vec(evens.map(|n| i32::from(n) * 2)).unwrap();
            let std: Vec<i32> = collection.into_iter().filter(|n| n % 2 == 0).map(|n| i32::from(n) * 2).collect();

            prop_assert_eq!(ours, std);
        }
    }
}
