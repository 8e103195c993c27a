use core::{fmt, iter};
use crate::{
    combinator::{Filter, Map},
    peekable::IntoPeekable,
    Error, Result
};

/// A single-pass cursor: the two-method protocol every adapter in this crate
/// consumes and produces.
///
/// Position only moves forward, there is no rewind and no random access.
///
/// # Example
///
/// ```
/// # use lazy_cursor::{Cursor, Seq, Error};
/// let src = [1, 2];
/// let mut cursor = Seq::new(&src);
///
/// assert!(cursor.has_next());
/// assert_eq!(cursor.next(), Ok(&1));
/// assert_eq!(cursor.next(), Ok(&2));
///
/// assert!(!cursor.has_next());
/// assert_eq!(cursor.next(), Err(Error::ExhaustedIterator));
/// ```
pub trait Cursor {
    /// The type of the elements produced.
    type Item;

    /// Returns `true` if a following call to [`next`] produces an element.
    ///
    /// Calling this repeatedly without an intervening `next` always gives the
    /// same answer and never loses an element. It takes `&mut self` since some
    /// adapters (see [`Filter`]) must look ahead to answer.
    ///
    /// [`next`]: Cursor::next
    fn has_next(&mut self) -> bool;

    /// Returns the current element and advances by one.
    ///
    /// # Errors
    ///
    /// [`Error::ExhaustedIterator`] when [`has_next`] is `false`.
    ///
    /// [`has_next`]: Cursor::has_next
    fn next(&mut self) -> Result<Self::Item>;

    /// Bounds on the number of remaining elements, with the same contract as
    /// [`Iterator::size_hint`].
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }

    /// Lazily apply `f` to every element, see [`Map`].
    #[inline]
    fn map<U, F>(self, f: F) -> Map<Self, F>
        where
            Self: Sized,
            F: FnMut(Self::Item) -> U
    {
        Map::new(self, f)
    }

    /// Lazily skip the elements rejected by `predicate`, see [`Filter`].
    #[inline]
    fn filter<F>(self, predicate: F) -> Filter<<Self as IntoPeekable>::Peekable, F>
        where
            Self: IntoPeekable + Sized,
            F: FnMut(&Self::Item) -> bool
    {
        Filter::new(self.into_peekable(), predicate)
    }

    /// Adapt this cursor into a [`core::iter::Iterator`].
    ///
    /// ```
    /// # use lazy_cursor::{Cursor, Seq};
    /// let src = [1, 2, 3];
    /// let doubled: Vec<i32> = Seq::new(&src).map(|n| n * 2).into_std().collect();
    ///
    /// assert_eq!(doubled, [2, 4, 6]);
    /// ```
    #[inline]
    fn into_std(self) -> Iter<Self>
        where Self: Sized
    {
        Iter { cursor: self }
    }
}

/// A cursor with one element of lookahead.
pub trait PeekCursor: Cursor {
    /// Returns a reference to the element the next [`next`] call will produce,
    /// without advancing.
    ///
    /// # Errors
    ///
    /// [`Error::ExhaustedIterator`] when there is nothing left to peek.
    ///
    /// [`next`]: Cursor::next
    fn peek(&mut self) -> Result<&Self::Item>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool { (**self).has_next() }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> { (**self).next() }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { (**self).size_hint() }
}

impl<C: PeekCursor + ?Sized> PeekCursor for &mut C {
    #[inline]
    fn peek(&mut self) -> Result<&Self::Item> { (**self).peek() }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool { (**self).has_next() }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> { (**self).next() }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { (**self).size_hint() }
}

impl<C: PeekCursor + ?Sized> PeekCursor for Box<C> {
    #[inline]
    fn peek(&mut self) -> Result<&Self::Item> { (**self).peek() }
}

/// A [`core::iter::Iterator`] over a [`Cursor`], created by [`Cursor::into_std`].
#[derive(Debug, Clone)]
pub struct Iter<C> {
    cursor: C
}

impl<C> Iter<C> {
    /// Recover the underlying cursor.
    #[inline]
    pub fn into_inner(self) -> C { self.cursor }
}

impl<C: Cursor> Iterator for Iter<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.has_next() {
            self.cursor.next().ok()
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

/// A [`Cursor`] over a [`core::iter::Iterator`], created by [`from_std`].
///
/// `has_next` needs lookahead, so the iterator is held in a
/// [`core::iter::Peekable`]. This makes it a [`PeekCursor`] already and
/// [`peekable`] hands it back without wrapping.
///
/// [`peekable`]: crate::peekable
pub struct IterCursor<I: Iterator> {
    iter: iter::Peekable<I>
}

impl<I> Clone for IterCursor<I>
    where
        I: Iterator + Clone,
        I::Item: Clone
{
    #[inline]
    fn clone(&self) -> Self {
        Self { iter: self.iter.clone() }
    }
}

impl<I> fmt::Debug for IterCursor<I>
    where
        I: Iterator + fmt::Debug,
        I::Item: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterCursor").field("iter", &self.iter).finish()
    }
}

/// Wrap anything iterable as a [`Cursor`].
///
/// ```
/// # use lazy_cursor::{from_std, Cursor, PeekCursor};
/// let mut cursor = from_std(1..=3);
///
/// assert_eq!(cursor.peek(), Ok(&1));
/// assert_eq!(cursor.next(), Ok(1));
/// assert_eq!(cursor.size_hint(), (2, Some(2)));
/// ```
#[inline]
pub fn from_std<I: IntoIterator>(iter: I) -> IterCursor<I::IntoIter> {
    IterCursor { iter: iter.into_iter().peekable() }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        self.iter.next().ok_or(Error::ExhaustedIterator)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I: Iterator> PeekCursor for IterCursor<I> {
    #[inline]
    fn peek(&mut self) -> Result<&Self::Item> {
        self.iter.peek().ok_or(Error::ExhaustedIterator)
    }
}
