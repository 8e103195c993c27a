use crate::{
    combinator::{Filter, Map},
    cursor::IterCursor,
    source::{Entries, Exact, Mapping, Seq, Values},
    coerce::Json,
    Cursor, Error, PeekCursor, Result
};

/// A cursor with a single-slot lookahead buffer.
///
/// Peeking pulls one element from the underlying cursor into the buffer, the
/// next call to [`next`] hands it out. The element sequence and count are
/// exactly those of the underlying cursor.
///
/// The buffer is an `Option`, so "nothing buffered" can never be confused with
/// a buffered element, even one that is itself `None`.
///
/// # Example
///
/// ```
/// # use lazy_cursor::{peekable, Cursor, PeekCursor, Seq};
/// let src = [1, 2];
/// let mut cursor = peekable(Seq::new(&src));
///
/// assert_eq!(cursor.peek(), Ok(&&1));
/// assert_eq!(cursor.peek(), Ok(&&1));
/// assert_eq!(cursor.next(), Ok(&1));
/// assert_eq!(cursor.next(), Ok(&2));
/// assert!(!cursor.has_next());
/// ```
///
/// [`next`]: Cursor::next
#[derive(Debug, Clone)]
pub struct Peekable<C: Cursor> {
    cursor: C,
    buffer: Option<C::Item>
}

impl<C: Cursor> Peekable<C> {
    /// Wrap `cursor`, unconditionally.
    ///
    /// Prefer [`peekable`], which leaves cursors that already peek alone.
    #[inline]
    pub const fn new(cursor: C) -> Self {
        Self { cursor, buffer: None }
    }

    /// Returns `true` if an element has been peeked but not yet consumed.
    ///
    /// While this holds, the next [`next`] does not touch the underlying
    /// cursor.
    ///
    /// ```
    /// # use lazy_cursor::{Peekable, Cursor, PeekCursor, Seq};
    /// let src = ['a'];
    /// let mut cursor = Peekable::new(Seq::new(&src));
    ///
    /// assert!(!cursor.is_buffered());
    /// let _ = cursor.peek();
    /// assert!(cursor.is_buffered());
    /// let _ = cursor.next();
    /// assert!(!cursor.is_buffered());
    /// ```
    ///
    /// [`next`]: Cursor::next
    #[inline]
    #[must_use]
    pub const fn is_buffered(&self) -> bool {
        self.buffer.is_some()
    }

    /// Advance only if `func` accepts the next element.
    ///
    /// ```
    /// # use lazy_cursor::{Peekable, from_std};
    /// let mut cursor = Peekable::new(from_std([1, 2, 3]));
    ///
    /// assert_eq!(cursor.next_if(|&n| n < 2), Some(1));
    /// assert_eq!(cursor.next_if(|&n| n < 2), None);
    /// assert!(cursor.is_buffered());
    /// ```
    pub fn next_if(&mut self, func: impl FnOnce(&C::Item) -> bool) -> Option<C::Item> {
        let accepted = match self.peek() {
            Ok(elem) => func(elem),
            Err(_) => false
        };

        if accepted { self.buffer.take() } else { None }
    }

    /// Recover the underlying cursor, returning the buffered element alongside
    /// it if one was peeked.
    #[inline]
    pub fn into_parts(self) -> (C, Option<C::Item>) {
        (self.cursor, self.buffer)
    }
}

impl<C: Cursor> Cursor for Peekable<C> {
    type Item = C::Item;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.buffer.is_some() || self.cursor.has_next()
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        match self.buffer.take() {
            Some(elem) => Ok(elem),
            None => self.cursor.next()
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = usize::from(self.buffer.is_some());
        let (lo, hi) = self.cursor.size_hint();

        (
            lo.saturating_add(buffered),
            hi.and_then(|hi| hi.checked_add(buffered))
        )
    }
}

impl<C: Cursor> PeekCursor for Peekable<C> {
    #[inline]
    fn peek(&mut self) -> Result<&Self::Item> {
        if self.buffer.is_none() {
            let elem = self.cursor.next()?;
            self.buffer = Some(elem);
        }

        self.buffer.as_ref().ok_or(Error::ExhaustedIterator)
    }
}

/// Conversion into a [`PeekCursor`].
///
/// Cursors that already peek return themselves, everything else is wrapped in
/// a [`Peekable`]. Wrapping is therefore never doubled up.
///
/// Implement this for your own cursors with `type Peekable = Peekable<Self>`,
/// or `Self` if they buffer natively.
///
/// A lent (`&mut C`) or boxed (`Box<C>`) cursor converts only when `C` already
/// peeks, and comes back as is. Wrap any other with [`Peekable::new`].
pub trait IntoPeekable: Cursor {
    /// The peekable form of this cursor.
    type Peekable: PeekCursor<Item = Self::Item>;

    /// Perform the conversion.
    fn into_peekable(self) -> Self::Peekable;
}

/// Add one element of lookahead to `cursor`.
///
/// ```
/// # use lazy_cursor::{peekable, Cursor, PeekCursor, Seq};
/// let src = [1, 2, 3];
/// let mut once = peekable(Seq::new(&src));
/// let _ = once.next();
///
/// // already peekable, so it comes back as is, position included
/// let mut twice = peekable(once);
/// assert_eq!(twice.peek(), Ok(&&2));
/// ```
#[inline]
pub fn peekable<C: IntoPeekable>(cursor: C) -> C::Peekable {
    cursor.into_peekable()
}

impl<C: Cursor> IntoPeekable for Peekable<C> {
    type Peekable = Self;

    #[inline]
    fn into_peekable(self) -> Self { self }
}

impl<I: Iterator> IntoPeekable for IterCursor<I> {
    type Peekable = Self;

    #[inline]
    fn into_peekable(self) -> Self { self }
}

impl<'a, T> IntoPeekable for Seq<'a, T> {
    type Peekable = Peekable<Self>;

    #[inline]
    fn into_peekable(self) -> Peekable<Self> { Peekable::new(self) }
}

impl<I: ExactSizeIterator> IntoPeekable for Exact<I> {
    type Peekable = Peekable<Self>;

    #[inline]
    fn into_peekable(self) -> Peekable<Self> { Peekable::new(self) }
}

impl<'a, M: Mapping> IntoPeekable for Values<'a, M> {
    type Peekable = Peekable<Self>;

    #[inline]
    fn into_peekable(self) -> Peekable<Self> { Peekable::new(self) }
}

impl<'a, M: Mapping> IntoPeekable for Entries<'a, M> {
    type Peekable = Peekable<Self>;

    #[inline]
    fn into_peekable(self) -> Peekable<Self> { Peekable::new(self) }
}

impl<C, F, U> IntoPeekable for Map<C, F>
    where
        C: Cursor,
        F: FnMut(C::Item) -> U
{
    type Peekable = Peekable<Self>;

    #[inline]
    fn into_peekable(self) -> Peekable<Self> { Peekable::new(self) }
}

impl<P, F> IntoPeekable for Filter<P, F>
    where
        P: PeekCursor,
        F: FnMut(&P::Item) -> bool
{
    type Peekable = Peekable<Self>;

    #[inline]
    fn into_peekable(self) -> Peekable<Self> { Peekable::new(self) }
}

impl IntoPeekable for Json {
    type Peekable = Peekable<Self>;

    #[inline]
    fn into_peekable(self) -> Peekable<Self> { Peekable::new(self) }
}

impl<'r, C: PeekCursor + ?Sized> IntoPeekable for &'r mut C {
    type Peekable = Self;

    #[inline]
    fn into_peekable(self) -> Self { self }
}

impl<C: PeekCursor + ?Sized> IntoPeekable for Box<C> {
    type Peekable = Self;

    #[inline]
    fn into_peekable(self) -> Self { self }
}
